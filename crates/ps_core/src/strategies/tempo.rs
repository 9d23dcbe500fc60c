//! Shared resolution model of the reference attacking strategies.
//!
//! Success probabilities are rating / 100, scaled by stamina, shot distance,
//! move difficulty and the opponent's defensive posture. Elapsed time comes
//! from the tempo profile. These numbers are illustrative defaults, not
//! something the engine depends on.

use crate::engine::moves::{Move, MoveResult};
use crate::engine::strategy::{DefensivePosture, TurnView};
use crate::models::{PlayerRef, Position};
use anyhow::{anyhow, bail};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Inclusive range of seconds an action takes.
pub type SecsRange = (u32, u32);

/// Pace profile of an attacking strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    pub wait_secs: SecsRange,
    pub pass_secs: SecsRange,
    pub shot_secs: SecsRange,
    /// Distance the holder dribbles toward goal while waiting.
    pub dribble_step: f32,
    /// Stamina spent per action (shots cost double).
    pub fatigue: u8,
    /// Stamina recovered per wait.
    pub recovery: u8,
    /// Overall multiplier on shot conversion.
    pub finishing: f32,
}

impl Tempo {
    pub const BALANCED: Tempo = Tempo {
        wait_secs: (15, 30),
        pass_secs: (4, 9),
        shot_secs: (6, 12),
        dribble_step: 0.08,
        fatigue: 1,
        recovery: 2,
        finishing: 0.10,
    };

    pub const FAST: Tempo = Tempo {
        wait_secs: (6, 12),
        pass_secs: (2, 5),
        shot_secs: (3, 7),
        dribble_step: 0.12,
        fatigue: 2,
        recovery: 1,
        finishing: 0.08,
    };

    pub const SLOW: Tempo = Tempo {
        wait_secs: (25, 45),
        pass_secs: (6, 14),
        shot_secs: (8, 16),
        dribble_step: 0.05,
        fatigue: 1,
        recovery: 3,
        finishing: 0.12,
    };
}

/// A strategy-defined special move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialMoveDef {
    pub slot: u8,
    pub name: &'static str,
    /// Multiplier on the shot probability (below 1 is harder).
    pub difficulty: f32,
    /// Needs a teammate, narrated as a multi-player move.
    pub needs_partner: bool,
    pub secs: SecsRange,
}

pub(crate) fn find_special(specials: &[SpecialMoveDef], slot: u8) -> Option<&SpecialMoveDef> {
    specials.iter().find(|s| s.slot == slot)
}

fn draw_secs(range: SecsRange, rng: &mut dyn RngCore) -> u32 {
    let (lo, hi) = (range.0.max(1), range.1.max(range.0).max(1));
    rng.gen_range(lo..=hi)
}

/// (pass factor, shot factor) against a defensive posture.
fn posture_factors(posture: DefensivePosture) -> (f32, f32) {
    match posture {
        DefensivePosture::Zonal => (1.0, 1.0),
        DefensivePosture::ManToMan => (0.9, 1.05),
        DefensivePosture::Unified => (1.05, 0.9),
    }
}

/// Moves the holder may legally choose right now.
pub(crate) fn available_moves(
    turn: &TurnView<'_>,
    table: &[(Move, u32)],
    specials: &[SpecialMoveDef],
) -> Vec<(Move, u32)> {
    let has_teammate = turn.teammates().next().is_some();
    table
        .iter()
        .copied()
        .filter(|(mv, weight)| {
            *weight > 0
                && match mv {
                    Move::BasicPass => has_teammate,
                    Move::Special(slot) => find_special(specials, *slot)
                        .map_or(false, |def| has_teammate || !def.needs_partner),
                    _ => true,
                }
        })
        .collect()
}

/// Weighted pick from the legal moves, falling back to `Wait`.
pub(crate) fn pick_weighted(
    turn: &TurnView<'_>,
    table: &[(Move, u32)],
    specials: &[SpecialMoveDef],
    rng: &mut dyn RngCore,
) -> anyhow::Result<Move> {
    let options = available_moves(turn, table, specials);
    if options.is_empty() {
        return Ok(Move::Wait);
    }
    let (mv, _) = options.choose_weighted(rng, |(_, weight)| *weight)?;
    Ok(*mv)
}

pub(crate) fn resolve(
    tempo: &Tempo,
    specials: &[SpecialMoveDef],
    mv: Move,
    turn: &mut TurnView<'_>,
    rng: &mut dyn RngCore,
) -> anyhow::Result<MoveResult> {
    match mv {
        Move::Wait => Ok(resolve_wait(tempo, turn, rng)),
        Move::BasicPass => resolve_pass(tempo, turn, rng),
        Move::BasicGoal => resolve_shot(tempo, 1.0, tempo.shot_secs, None, turn, rng),
        Move::Special(slot) => {
            let def = *find_special(specials, slot)
                .ok_or_else(|| anyhow!("special slot {slot} is not defined"))?;
            let partner = if def.needs_partner {
                let holder = turn.holder();
                let mate = holder
                    .nearest(turn.teammates())
                    .ok_or_else(|| anyhow!("{} needs a teammate", def.name))?;
                Some(mate)
            } else {
                None
            };
            resolve_shot(tempo, def.difficulty, def.secs, partner, turn, rng)
        }
    }
}

fn resolve_wait(tempo: &Tempo, turn: &mut TurnView<'_>, rng: &mut dyn RngCore) -> MoveResult {
    let goal = turn.attack.opposing_goal(rng);
    let holder = turn.holder_mut();
    holder.position.move_towards(&goal, tempo.dribble_step);
    holder.recover(tempo.recovery);
    MoveResult::nothing(draw_secs(tempo.wait_secs, rng))
}

fn resolve_pass(
    tempo: &Tempo,
    turn: &mut TurnView<'_>,
    rng: &mut dyn RngCore,
) -> anyhow::Result<MoveResult> {
    let candidates: Vec<usize> = turn.teammates().map(|(idx, _)| idx).collect();
    let Some(&receiver) = candidates.choose(rng) else {
        bail!("no teammate to pass to");
    };

    let (pass_factor, _) = posture_factors(turn.opposing_defense.posture());
    let from = turn.holder().position;
    let to = turn.attack.players[receiver].position;
    let p_complete = (turn.holder().effective_passing() / 100.0 * pass_factor).clamp(0.0, 1.0);
    let elapsed = draw_secs(tempo.pass_secs, rng);
    turn.holder_mut().tire(tempo.fatigue);

    let intended = turn.attack.player_ref(receiver);
    if rng.gen::<f32>() < p_complete {
        let goal = turn.attack.opposing_goal(rng);
        turn.attack.players[receiver]
            .position
            .move_towards(&goal, tempo.dribble_step);
        return Ok(MoveResult::pass_completed(intended, elapsed));
    }

    let interceptor = closest_to_lane(turn, &from, &to)
        .ok_or_else(|| anyhow!("defending team has no players"))?;
    turn.defence.players[interceptor].position = to;
    Ok(MoveResult::pass_intercepted(
        intended,
        turn.defence.player_ref(interceptor),
        elapsed,
    ))
}

/// Defender closest to the passing lane between `from` and `to`.
fn closest_to_lane(turn: &TurnView<'_>, from: &Position, to: &Position) -> Option<usize> {
    turn.defence
        .players
        .iter()
        .enumerate()
        .map(|(idx, p)| (idx, p.position.distance_to_line(from, to)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx)
}

fn resolve_shot(
    tempo: &Tempo,
    difficulty: f32,
    secs: SecsRange,
    partner: Option<usize>,
    turn: &mut TurnView<'_>,
    rng: &mut dyn RngCore,
) -> anyhow::Result<MoveResult> {
    let goal = turn.attack.opposing_goal(rng);
    let (_, shot_factor) = posture_factors(turn.opposing_defense.posture());
    let holder = turn.holder();
    let distance_factor = (1.0 - holder.position.distance(&goal) / 2.0).clamp(0.1, 1.0);
    let p_score = (holder.effective_shooting() / 100.0
        * distance_factor
        * tempo.finishing
        * difficulty
        * shot_factor)
        .clamp(0.0, 1.0);
    let elapsed = draw_secs(secs, rng);
    turn.holder_mut().tire(tempo.fatigue.saturating_mul(2));

    let mut co_actors: Vec<PlayerRef> = Vec::new();
    if let Some(mate) = partner {
        let holder_pos = turn.holder().position;
        let mate_player = &mut turn.attack.players[mate];
        mate_player.position.move_towards(&holder_pos, tempo.dribble_step);
        mate_player.tire(tempo.fatigue);
        co_actors.push(turn.attack.player_ref(mate));
    }

    let scored = rng.gen::<f32>() < p_score;
    // Kickoff goes to the conceding side, a miss to their keeper.
    let next_holder = if scored {
        turn.defence.nearest_to(&Position::CENTRE_SPOT)
    } else {
        turn.defence
            .goalkeeper()
            .or_else(|| turn.defence.nearest_to(&goal))
    };

    Ok(MoveResult::shot(
        scored,
        next_holder.map(|idx| turn.defence.player_ref(idx)),
        elapsed,
    )
    .with_co_actors(co_actors))
}
