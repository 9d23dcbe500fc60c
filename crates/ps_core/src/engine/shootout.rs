//! Penalty shootout used when regulation ends level.
//!
//! A uniformly drawn team kicks first. Each side takes `penalty_rounds`
//! kicks, alternating, with kickers rotating through the roster in order.
//! Every make adds one to the kicking team's score. If the sides are still
//! level, sudden death follows: one kick each per round until exactly one
//! side scores in a round.

use super::config::MatchConfig;
use super::events::{EventKind, MatchEvent, Scoreline};
use crate::error::{MatchError, Result};
use crate::models::{Player, Team, TeamSlot};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decides whether a single penalty kick goes in.
pub trait PenaltyModel: fmt::Debug {
    fn kick(
        &self,
        kicker: &Player,
        kicking: &Team,
        defending: &Team,
        rng: &mut dyn RngCore,
    ) -> bool;
}

/// Default model: kicker against keeper. Equal ratings convert 75% of the
/// time, each point of difference moves that by 0.4%, clamped to 55%..92%.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingPenaltyModel;

impl RatingPenaltyModel {
    pub fn conversion_chance(&self, kicker: &Player, defending: &Team) -> f32 {
        let diff = kicker.effective_shooting() - keeper_rating(defending);
        (0.75 + diff * 0.004).clamp(0.55, 0.92)
    }
}

impl PenaltyModel for RatingPenaltyModel {
    fn kick(
        &self,
        kicker: &Player,
        _kicking: &Team,
        defending: &Team,
        rng: &mut dyn RngCore,
    ) -> bool {
        rng.gen::<f32>() < self.conversion_chance(kicker, defending)
    }
}

/// The defending goalkeeper's effective overall rating. Without a
/// goalkeeper the best-rated player goes in goal.
fn keeper_rating(defending: &Team) -> f32 {
    match defending.goalkeeper() {
        Some(idx) => defending.players[idx].effective_overall(),
        None => defending
            .players
            .iter()
            .map(Player::effective_overall)
            .fold(0.0, f32::max),
    }
}

/// Every kick converts with the same probability.
#[derive(Debug, Clone, Copy)]
pub struct FixedPenaltyModel {
    pub probability: f64,
}

impl FixedPenaltyModel {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl PenaltyModel for FixedPenaltyModel {
    fn kick(
        &self,
        _kicker: &Player,
        _kicking: &Team,
        _defending: &Team,
        rng: &mut dyn RngCore,
    ) -> bool {
        rng.gen_bool(self.probability)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyKick {
    pub kick_index: u32,
    pub team: TeamSlot,
    pub kicker: String,
    pub scored: bool,
    pub sudden_death: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootoutSummary {
    pub first_kicker: TeamSlot,
    pub goals_home: u32,
    pub goals_away: u32,
    pub kicks_taken_home: u32,
    pub kicks_taken_away: u32,
    pub sudden_death_rounds: u32,
    pub winner: TeamSlot,
    pub kicks: Vec<PenaltyKick>,
}

struct Shootout<'a> {
    teams: &'a mut [Team; 2],
    model: &'a dyn PenaltyModel,
    time: u32,
    next_kicker: [usize; 2],
    goals: [u32; 2],
    kicks_taken: [u32; 2],
    kicks: Vec<PenaltyKick>,
    events: Vec<MatchEvent>,
}

impl<'a> Shootout<'a> {
    fn take_kick(&mut self, slot: TeamSlot, sudden_death: bool, rng: &mut dyn RngCore) -> bool {
        let (us, them) = (slot.index(), slot.other().index());
        let roster_len = self.teams[us].players.len();
        let kicker_idx = self.next_kicker[us] % roster_len;
        self.next_kicker[us] += 1;

        let scored = {
            let kicking = &self.teams[us];
            self.model
                .kick(&kicking.players[kicker_idx], kicking, &self.teams[them], rng)
        };

        self.kicks_taken[us] += 1;
        let kicker = self.teams[us].players[kicker_idx].name.clone();
        let team = self.teams[us].name.clone();

        let kind = if scored {
            self.goals[us] += 1;
            self.teams[us].score += 1;
            EventKind::Penalty {
                player: kicker.clone(),
                team,
                score: Scoreline::new(self.teams[0].score, self.teams[1].score),
            }
        } else {
            EventKind::MissedPenalty {
                player: kicker.clone(),
                team,
            }
        };
        tracing::debug!(team = ?slot, %kicker, scored, sudden_death, "penalty kick");

        self.kicks.push(PenaltyKick {
            kick_index: self.kicks.len() as u32 + 1,
            team: slot,
            kicker,
            scored,
            sudden_death,
        });
        self.events.push(MatchEvent::new(self.time, kind));
        scored
    }
}

/// Run a full shootout and return the kick events plus a summary.
///
/// Team scores are increased in place for every converted kick. Fails with
/// [`MatchError::ShootoutUndecided`] when sudden death exceeds
/// `config.sudden_death_limit` rounds.
pub fn run_shootout(
    teams: &mut [Team; 2],
    model: &dyn PenaltyModel,
    config: &MatchConfig,
    time: u32,
    rng: &mut dyn RngCore,
) -> Result<(Vec<MatchEvent>, ShootoutSummary)> {
    let first = if rng.gen_bool(0.5) {
        TeamSlot::Home
    } else {
        TeamSlot::Away
    };
    let second = first.other();

    let mut shootout = Shootout {
        teams,
        model,
        time,
        next_kicker: [0, 0],
        goals: [0, 0],
        kicks_taken: [0, 0],
        kicks: Vec::new(),
        events: Vec::new(),
    };

    for _ in 0..config.penalty_rounds {
        shootout.take_kick(first, false, rng);
        shootout.take_kick(second, false, rng);
    }

    let mut sudden_death_rounds = 0;
    let winner = match shootout.goals[first.index()].cmp(&shootout.goals[second.index()]) {
        std::cmp::Ordering::Greater => first,
        std::cmp::Ordering::Less => second,
        std::cmp::Ordering::Equal => loop {
            if sudden_death_rounds >= config.sudden_death_limit {
                tracing::warn!(rounds = sudden_death_rounds, "shootout undecided");
                return Err(MatchError::ShootoutUndecided {
                    rounds: sudden_death_rounds,
                });
            }
            sudden_death_rounds += 1;
            let first_scored = shootout.take_kick(first, true, rng);
            let second_scored = shootout.take_kick(second, true, rng);
            if first_scored != second_scored {
                break if first_scored { first } else { second };
            }
        },
    };

    tracing::info!(
        winner = ?winner,
        home = shootout.goals[0],
        away = shootout.goals[1],
        sudden_death_rounds,
        "shootout decided"
    );

    let summary = ShootoutSummary {
        first_kicker: first,
        goals_home: shootout.goals[0],
        goals_away: shootout.goals[1],
        kicks_taken_home: shootout.kicks_taken[0],
        kicks_taken_away: shootout.kicks_taken[1],
        sudden_death_rounds,
        winner,
        kicks: shootout.kicks,
    };
    Ok((shootout.events, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::events::EventType;
    use crate::engine::test_fixtures::{level_teams, team_pair};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Home always converts, away never does.
    #[derive(Debug)]
    struct HomeOnly;

    impl PenaltyModel for HomeOnly {
        fn kick(&self, _: &Player, kicking: &Team, _: &Team, _: &mut dyn RngCore) -> bool {
            kicking.name == "Alpha"
        }
    }

    #[test]
    fn test_regular_rounds_decide() {
        let mut teams = team_pair();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (events, summary) =
            run_shootout(&mut teams, &HomeOnly, &MatchConfig::default(), 5400, &mut rng).unwrap();

        assert_eq!(summary.winner, TeamSlot::Home);
        assert_eq!(summary.goals_home, 5);
        assert_eq!(summary.goals_away, 0);
        assert_eq!(summary.sudden_death_rounds, 0);
        assert_eq!(events.len(), 10);
        assert_eq!(teams[0].score, 5);
        assert!(events.iter().all(|e| e.time == 5400));
    }

    #[test]
    fn test_kicks_alternate_and_rotate_kickers() {
        let mut teams = team_pair();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let (_, summary) = run_shootout(
            &mut teams,
            &FixedPenaltyModel::new(0.5),
            &MatchConfig::default(),
            0,
            &mut rng,
        )
        .unwrap();

        for pair in summary.kicks.windows(2) {
            assert_ne!(pair[0].team, pair[1].team);
        }
        assert_eq!(summary.kicks[0].team, summary.first_kicker);
        let first_names: Vec<&str> = summary
            .kicks
            .iter()
            .filter(|k| k.team == TeamSlot::Home)
            .take(2)
            .map(|k| k.kicker.as_str())
            .collect();
        assert_eq!(first_names, vec![teams[0].players[0].name.as_str(), teams[0].players[1].name.as_str()]);
        assert_eq!(summary.kicks_taken_home, summary.kicks_taken_away);
    }

    #[test]
    fn test_keeper_rating_moves_conversion() {
        let [alpha, mut beta] = team_pair();
        let kicker = &alpha.players[0];
        let gk = beta.goalkeeper().unwrap();
        let model = RatingPenaltyModel;

        beta.players[gk].passing = 50;
        beta.players[gk].shooting = 50;
        let weak = model.conversion_chance(kicker, &beta);
        beta.players[gk].passing = 100;
        beta.players[gk].shooting = 100;
        let strong = model.conversion_chance(kicker, &beta);
        assert!(weak > strong, "weak keeper {weak} vs strong keeper {strong}");

        // Equal kicker and keeper ratings give the base rate.
        let mut keeper = kicker.clone();
        keeper.role = crate::models::PlayerRole::Goalkeeper;
        beta.players[gk] = keeper;
        assert!((model.conversion_chance(kicker, &beta) - 0.75).abs() < 1e-6);

        let mut makes = [0u32; 2];
        for (slot, rating) in [50u8, 100].into_iter().enumerate() {
            beta.players[gk].passing = rating;
            beta.players[gk].shooting = rating;
            let mut rng = ChaCha8Rng::seed_from_u64(8);
            for _ in 0..2000 {
                if model.kick(kicker, &alpha, &beta, &mut rng) {
                    makes[slot] += 1;
                }
            }
        }
        assert!(makes[0] > makes[1] + 200, "{makes:?}");
    }

    #[test]
    fn test_always_scoring_is_undecided() {
        let mut teams = team_pair();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = MatchConfig {
            sudden_death_limit: 3,
            ..MatchConfig::default()
        };
        let err = run_shootout(&mut teams, &FixedPenaltyModel::new(1.0), &config, 0, &mut rng)
            .unwrap_err();
        assert!(matches!(err, MatchError::ShootoutUndecided { rounds: 3 }));
    }

    #[test]
    fn test_penalty_events_track_scores() {
        let mut teams = level_teams(2);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let (events, summary) = run_shootout(
            &mut teams,
            &RatingPenaltyModel,
            &MatchConfig::default(),
            5400,
            &mut rng,
        )
        .unwrap();

        let makes = events
            .iter()
            .filter(|e| e.event_type() == EventType::Penalty)
            .count() as u32;
        assert_eq!(makes, summary.goals_home + summary.goals_away);
        assert_eq!(teams[0].score, 2 + summary.goals_home);
        assert_eq!(teams[1].score, 2 + summary.goals_away);
        assert_ne!(teams[0].score, teams[1].score);
    }

    #[test]
    fn test_fifty_percent_shootouts_are_fair() {
        let runs = 2000;
        let mut home_wins = 0;
        for seed in 0..runs {
            let mut teams = team_pair();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (_, summary) = run_shootout(
                &mut teams,
                &FixedPenaltyModel::new(0.5),
                &MatchConfig::default(),
                0,
                &mut rng,
            )
            .unwrap();
            if summary.winner == TeamSlot::Home {
                home_wins += 1;
            }
        }
        let share = home_wins as f64 / runs as f64;
        assert!((0.44..=0.56).contains(&share), "home share {share}");
    }
}
