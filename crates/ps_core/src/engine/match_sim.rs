//! Match Simulation Engine
//!
//! Turn-driven state machine for a single match. The engine owns the clock,
//! the possession pointer and both teams; strategies only see a
//! [`TurnView`] and answer with a [`Move`] and a [`MoveResult`].
//!
//! ## Turn flow
//!
//! ```text
//! possession player ──► offense.pick_move ──► offense.resolve_move
//!                                                   │
//!            ┌──────────────────────────────────────┘
//!            ▼
//!   validate (elapsed >= 1, known move, refs)      ─► contract error, nothing applied
//!            ▼
//!   clock += elapsed, score += scored, possession = new_possession
//!   (a completed pass without one hands the ball to its receiver)
//!            ▼
//!   one MatchEvent (WAIT emits none) ─► HALFTIME once ─► END at regulation
//! ```
//!
//! After regulation: VICTORY for the leader, or ENTER_PENALTY, the shootout
//! kicks and then VICTORY.
//!
//! Any failed turn moves the match to [`MatchPhase::Aborted`]; every later
//! call returns [`MatchError::Aborted`].
//!
//! All randomness comes from one `ChaCha8Rng`, so a seed fixes the log.

use super::config::MatchConfig;
use super::events::{EventKind, EventType, MatchEvent, Scoreline};
use super::match_phase::{next_phase, MatchPhase};
use super::moves::{Move, MoveResult, SPECIAL_MOVE_SLOTS};
use super::report::MatchReport;
use super::shootout::{run_shootout, PenaltyModel, RatingPenaltyModel, ShootoutSummary};
use super::strategy::{DefensiveStrategy, OffensiveStrategy, TeamView, TurnView};
use crate::error::{MatchError, Result};
use crate::models::{PlayerRef, Team, TeamSlot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// What one strategy call produced, before the engine checks it.
struct TurnOutput {
    strategy: String,
    mv: Move,
    special_name: Option<String>,
    result: MoveResult,
}

pub struct MatchEngine {
    rng: ChaCha8Rng,
    /// Seed the RNG was built from (None for caller-supplied RNGs)
    seed: Option<u64>,
    teams: [Team; 2],
    config: MatchConfig,
    penalty_model: Box<dyn PenaltyModel>,

    phase: MatchPhase,
    clock: u32,
    possession: PlayerRef,
    turns: u32,
    halftime_emitted: bool,
    /// Message of the error that aborted the match
    failure: Option<String>,
    events: Vec<MatchEvent>,
}

impl MatchEngine {
    pub fn new(home: Team, away: Team, config: MatchConfig, seed: u64) -> Result<Self> {
        let mut engine = Self::with_rng(home, away, config, ChaCha8Rng::seed_from_u64(seed))?;
        engine.seed = Some(seed);
        Ok(engine)
    }

    /// Build an engine around a caller-supplied RNG.
    pub fn with_rng(home: Team, away: Team, config: MatchConfig, mut rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        for team in [&home, &away] {
            if team.players.is_empty() {
                return Err(MatchError::EmptyRoster {
                    team: team.name.clone(),
                });
            }
        }
        if home.name == away.name {
            return Err(MatchError::IdenticalTeams(home.name));
        }
        if home.side == away.side {
            return Err(MatchError::SameSide { side: home.side });
        }

        let kickoff = rng.gen_range(0..home.players.len());
        tracing::debug!(
            home = %home.name,
            away = %away.name,
            kickoff = %home.players[kickoff].name,
            regulation_secs = config.regulation_secs,
            "match engine ready"
        );

        Ok(Self {
            rng,
            seed: None,
            teams: [home, away],
            config,
            penalty_model: Box::new(RatingPenaltyModel),
            phase: MatchPhase::PreKickoff,
            clock: 0,
            possession: PlayerRef::new(TeamSlot::Home, kickoff),
            turns: 0,
            halftime_emitted: false,
            failure: None,
            events: Vec::new(),
        })
    }

    pub fn with_penalty_model(mut self, model: Box<dyn PenaltyModel>) -> Self {
        self.penalty_model = model;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn clock(&self) -> u32 {
        self.clock
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn possession(&self) -> PlayerRef {
        self.possession
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn score(&self) -> Scoreline {
        Scoreline::new(self.teams[0].score, self.teams[1].score)
    }

    pub fn team(&self, slot: TeamSlot) -> &Team {
        &self.teams[slot.index()]
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Swap a team's attacking strategy between turns.
    pub fn set_offensive_strategy(&mut self, slot: TeamSlot, strategy: Box<dyn OffensiveStrategy>) {
        tracing::info!(team = %self.teams[slot.index()].name, strategy = strategy.name(), "offensive strategy changed");
        self.teams[slot.index()].change_offensive_strategy(strategy);
    }

    pub fn set_defensive_strategy(&mut self, slot: TeamSlot, strategy: Box<dyn DefensiveStrategy>) {
        tracing::info!(team = %self.teams[slot.index()].name, strategy = strategy.name(), "defensive strategy changed");
        self.teams[slot.index()].change_defensive_strategy(strategy);
    }

    // ========================================================================
    // Regulation
    // ========================================================================

    fn aborted(&self) -> Option<MatchError> {
        self.failure
            .as_ref()
            .map(|reason| MatchError::Aborted {
                reason: reason.clone(),
            })
    }

    /// Play one turn. Returns `true` while regulation time remains.
    ///
    /// An error is fatal: the match is aborted and cannot be resumed, even
    /// after swapping strategies.
    pub fn step_turn(&mut self) -> Result<bool> {
        if let Some(err) = self.aborted() {
            return Err(err);
        }
        if !self.phase.is_in_play() {
            return Err(MatchError::AlreadyFinished);
        }
        self.play_turn().map_err(|err| {
            tracing::error!(clock = self.clock, turns = self.turns, error = %err, "match aborted");
            self.failure = Some(err.to_string());
            self.phase = MatchPhase::Aborted;
            err
        })
    }

    fn play_turn(&mut self) -> Result<bool> {
        if let Some(limit) = self.config.max_turns {
            if self.turns >= limit {
                tracing::warn!(limit, clock = self.clock, "turn limit reached");
                return Err(MatchError::TurnLimitExceeded {
                    limit,
                    clock: self.clock,
                });
            }
        }
        if self.phase == MatchPhase::PreKickoff {
            self.phase = next_phase(self.phase, false);
            tracing::info!(possession = %self.name_of(self.possession), "kickoff");
        }

        let output = self.run_strategy()?;
        let (special_name, pass_target) = self.validate(&output)?;
        self.apply(output, special_name, pass_target);

        self.check_boundaries();
        Ok(self.phase.is_in_play())
    }

    /// Ask the ball holder's offensive strategy for a move and its outcome.
    fn run_strategy(&mut self) -> Result<TurnOutput> {
        let attacking = self.possession.team;
        let (first, second) = self.teams.split_at_mut(1);
        let (att, def) = match attacking {
            TeamSlot::Home => (&mut first[0], &mut second[0]),
            TeamSlot::Away => (&mut second[0], &mut first[0]),
        };

        let strategy: &dyn OffensiveStrategy = att.offense.as_ref();
        let mut view = TurnView {
            possession: self.possession,
            attack: TeamView {
                slot: attacking,
                name: &att.name,
                side: att.side,
                score: att.score,
                players: &mut att.players,
            },
            defence: TeamView {
                slot: attacking.other(),
                name: &def.name,
                side: def.side,
                score: def.score,
                players: &mut def.players,
            },
            opposing_defense: def.defense.as_ref(),
        };

        let strategy_name = strategy.name().to_string();
        let wrap = |source: anyhow::Error| MatchError::Strategy {
            strategy: strategy_name.clone(),
            source,
        };

        let mv = strategy.pick_move(&view, &mut self.rng).map_err(wrap)?;

        // Unknown specials are rejected before the strategy resolves anything.
        let special_name = match mv {
            Move::Special(slot) => {
                let name = (slot < SPECIAL_MOVE_SLOTS)
                    .then(|| strategy.special_move_name(slot))
                    .flatten();
                match name {
                    Some(name) => Some(name.to_string()),
                    None => {
                        tracing::warn!(strategy = %strategy_name, code = mv.code(), "unknown move");
                        return Err(MatchError::UnknownMove {
                            strategy: strategy_name.clone(),
                            code: mv.code(),
                        });
                    }
                }
            }
            _ => None,
        };

        let result = strategy
            .resolve_move(mv, &mut view, &mut self.rng)
            .map_err(wrap)?;

        Ok(TurnOutput {
            strategy: strategy_name,
            mv,
            special_name,
            result,
        })
    }

    fn is_valid_ref(&self, player: PlayerRef) -> bool {
        player.index < self.teams[player.team.index()].players.len()
    }

    /// Check a strategy's answer against the move contract.
    ///
    /// Returns the special move name and, for passes, the intended receiver.
    fn validate(&self, output: &TurnOutput) -> Result<(Option<String>, Option<PlayerRef>)> {
        let TurnOutput {
            strategy,
            mv,
            special_name,
            result,
        } = output;
        let attacking = self.possession.team;
        let violation = |reason: String| {
            tracing::warn!(strategy = %strategy, %reason, "move contract violated");
            MatchError::Contract {
                strategy: strategy.clone(),
                reason,
            }
        };

        if result.elapsed < 1 {
            tracing::warn!(strategy = %strategy, elapsed = result.elapsed, "turn took no time");
            return Err(MatchError::InvalidElapsed {
                strategy: strategy.clone(),
                elapsed: result.elapsed,
            });
        }

        let refs = result
            .new_possession
            .iter()
            .chain(result.target.iter())
            .chain(result.co_actors.iter());
        for player in refs {
            if !self.is_valid_ref(*player) {
                return Err(violation(format!("{player} is not on either roster")));
            }
        }

        if !result.co_actors.is_empty() {
            if !mv.is_special() {
                return Err(violation(format!("co-actors reported for a {mv} move")));
            }
            if result.co_actors.iter().any(|p| p.team != attacking) {
                return Err(violation("co-actors must play for the attacking team".to_string()));
            }
        }

        if *mv == Move::Wait && result.scored {
            return Err(violation("waiting cannot score".to_string()));
        }

        let mut pass_target = None;
        if *mv == Move::BasicPass {
            if result.scored {
                return Err(violation("a pass cannot score".to_string()));
            }
            let completed = result.new_possession.map_or(true, |p| p.team == attacking);
            let target = if completed {
                result.target.or(result.new_possession)
            } else {
                result.target
            };
            match target {
                Some(t) if t.team == attacking && t != self.possession => pass_target = Some(t),
                Some(t) => return Err(violation(format!("pass target {t} is not a teammate"))),
                None => return Err(violation("pass without a target".to_string())),
            }
        }

        Ok((special_name.clone(), pass_target))
    }

    fn name_of(&self, player: PlayerRef) -> String {
        self.teams[player.team.index()].players[player.index]
            .name
            .clone()
    }

    /// Apply a validated turn and record its event.
    fn apply(&mut self, output: TurnOutput, special_name: Option<String>, pass_target: Option<PlayerRef>) {
        let TurnOutput { mv, result, .. } = output;
        let holder = self.possession;
        let attacking = holder.team;

        self.clock = self.clock.saturating_add(result.elapsed);
        self.turns += 1;
        {
            let player = &mut self.teams[attacking.index()].players[holder.index];
            player.possession_time = player.possession_time.saturating_add(result.elapsed);
        }
        if result.scored {
            self.teams[attacking.index()].score += 1;
        }
        match (result.new_possession, pass_target) {
            (Some(next), _) => self.possession = next,
            (None, Some(receiver)) if mv == Move::BasicPass => self.possession = receiver,
            _ => {}
        }

        let success = match mv {
            Move::BasicPass => self.possession.team == attacking,
            _ => result.scored,
        };
        let event_type = EventType::classify(mv, success, !result.co_actors.is_empty());
        tracing::debug!(
            clock = self.clock,
            team = ?attacking,
            player = %self.name_of(holder),
            %mv,
            ?event_type,
            elapsed = result.elapsed,
            "turn"
        );

        let player = self.name_of(holder);
        let score = self.score();
        let name = special_name.unwrap_or_default();
        let kind = match event_type {
            EventType::None => None,
            EventType::Pass => Some(EventKind::Pass {
                player,
                target: pass_target.map(|t| self.name_of(t)).unwrap_or_default(),
            }),
            EventType::Intercept => Some(EventKind::Intercept {
                player,
                target: pass_target.map(|t| self.name_of(t)).unwrap_or_default(),
                interceptor: self.name_of(self.possession),
            }),
            EventType::Goal => Some(EventKind::Goal { player, score }),
            EventType::MissedGoal => Some(EventKind::MissedGoal { player }),
            EventType::SpecialMove => Some(EventKind::SpecialMove { player, name }),
            EventType::SpecialMoveScore => Some(EventKind::SpecialMoveScore {
                player,
                name,
                score,
            }),
            EventType::MultiSpecialMove | EventType::MultiSpecialMoveScore => {
                let mut players = vec![player];
                players.extend(result.co_actors.iter().map(|p| self.name_of(*p)));
                Some(if event_type == EventType::MultiSpecialMove {
                    EventKind::MultiSpecialMove { players, name }
                } else {
                    EventKind::MultiSpecialMoveScore {
                        players,
                        name,
                        score,
                    }
                })
            }
            // classify only yields turn events
            _ => None,
        };

        if event_type.is_scoring() {
            tracing::info!(
                clock = self.clock,
                team = %self.teams[attacking.index()].name,
                home = score.home,
                away = score.away,
                "goal"
            );
        }
        if let Some(kind) = kind {
            self.events.push(MatchEvent::new(self.clock, kind));
        }
    }

    /// Halftime and full-time transitions after a turn.
    fn check_boundaries(&mut self) {
        if !self.halftime_emitted && self.clock.saturating_mul(2) >= self.config.regulation_secs {
            self.halftime_emitted = true;
            self.events.push(MatchEvent::new(self.clock, EventKind::HalfTime));
            self.phase = next_phase(MatchPhase::FirstHalf, false);
            if self.config.swap_sides_at_halftime {
                for team in &mut self.teams {
                    team.side = team.side.flipped();
                    for player in &mut team.players {
                        player.position = player.position.mirrored();
                    }
                }
            }
            let score = self.score();
            tracing::info!(clock = self.clock, home = score.home, away = score.away, "halftime");
        }

        if self.clock >= self.config.regulation_secs {
            self.events.push(MatchEvent::new(self.clock, EventKind::End));
            self.phase = next_phase(MatchPhase::SecondHalf, false);
            let score = self.score();
            tracing::info!(
                clock = self.clock,
                turns = self.turns,
                home = score.home,
                away = score.away,
                "full time"
            );
        }
    }

    // ========================================================================
    // Full time
    // ========================================================================

    /// Play out any remaining regulation, settle a draw on penalties and
    /// return the report.
    pub fn finish(mut self) -> Result<MatchReport> {
        if let Some(err) = self.aborted() {
            return Err(err);
        }
        while self.phase.is_in_play() {
            self.step_turn()?;
        }

        let regulation_score = self.score();
        let shootout = if regulation_score.is_level() {
            Some(self.settle_on_penalties()?)
        } else {
            None
        };
        self.phase = MatchPhase::Finished;

        let final_score = self.score();
        let winner = if final_score.home > final_score.away {
            TeamSlot::Home
        } else {
            TeamSlot::Away
        };
        let winner_name = self.teams[winner.index()].name.clone();
        self.events.push(MatchEvent::new(
            self.clock,
            EventKind::Victory {
                team: winner_name.clone(),
                score: final_score,
            },
        ));
        tracing::info!(winner = %winner_name, home = final_score.home, away = final_score.away, "victory");

        let possession_secs = |slot: TeamSlot| -> u32 {
            self.teams[slot.index()]
                .players
                .iter()
                .map(|p| p.possession_time)
                .sum()
        };

        Ok(MatchReport {
            seed: self.seed,
            home_name: self.teams[0].name.clone(),
            away_name: self.teams[1].name.clone(),
            regulation_score,
            final_score,
            winner,
            winner_name,
            turns: self.turns,
            possession_home_secs: possession_secs(TeamSlot::Home),
            possession_away_secs: possession_secs(TeamSlot::Away),
            shootout,
            events: self.events,
        })
    }

    /// Run the whole match from kickoff.
    pub fn simulate(self) -> Result<MatchReport> {
        self.finish()
    }

    fn settle_on_penalties(&mut self) -> Result<ShootoutSummary> {
        self.events
            .push(MatchEvent::new(self.clock, EventKind::EnterPenalty));
        self.phase = next_phase(self.phase, true);
        tracing::info!(clock = self.clock, "level at full time, penalty shootout");

        let (kicks, summary) = run_shootout(
            &mut self.teams,
            self.penalty_model.as_ref(),
            &self.config,
            self.clock,
            &mut self.rng,
        )?;
        if summary.sudden_death_rounds > 0 {
            self.phase = MatchPhase::SuddenDeath;
        }
        self.events.extend(kicks);
        Ok(summary)
    }
}
