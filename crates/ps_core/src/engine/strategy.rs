//! Strategy contract
//!
//! A team plugs in one [`OffensiveStrategy`] and one [`DefensiveStrategy`].
//! The engine asks the ball holder's offensive strategy to pick a move and
//! then to resolve it; whatever the strategy reports comes back as a
//! [`MoveResult`] that only the engine applies.
//!
//! ## Rules for implementors
//! - All randomness comes from the `rng` argument. Hidden global state breaks
//!   seeded replays.
//! - Strategies may change player stamina and positions through the
//!   [`TurnView`]. Score and possession are out of reach; report them in the
//!   [`MoveResult`].
//! - Returning `Err` aborts the whole match. The engine does not retry.
//! - `Move::Special(slot)` is only legal when `special_move_name(slot)`
//!   returns `Some`.

use super::moves::{Move, MoveResult};
use crate::models::{team, Player, PlayerRef, Position, Side, TeamSlot};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait OffensiveStrategy: fmt::Debug {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &str;

    fn pick_move(&self, turn: &TurnView<'_>, rng: &mut dyn RngCore) -> anyhow::Result<Move>;

    fn resolve_move(
        &self,
        mv: Move,
        turn: &mut TurnView<'_>,
        rng: &mut dyn RngCore,
    ) -> anyhow::Result<MoveResult>;

    /// Display name of a special slot, `None` when the slot is unused.
    fn special_move_name(&self, _slot: u8) -> Option<&str> {
        None
    }
}

/// Broad shape of a defensive setup, the one thing an attacking strategy may
/// read off its opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefensivePosture {
    Zonal,
    Unified,
    ManToMan,
}

/// Opaque capability token. The engine never calls it; it only hands the
/// reference to the opposing offensive strategy.
pub trait DefensiveStrategy: fmt::Debug {
    fn name(&self) -> &str;

    fn posture(&self) -> DefensivePosture;
}

/// One team as seen by a strategy during a turn.
///
/// `score` is a snapshot; writing to it has no effect on the match.
#[derive(Debug)]
pub struct TeamView<'a> {
    pub slot: TeamSlot,
    pub name: &'a str,
    pub side: Side,
    pub score: u32,
    pub players: &'a mut [Player],
}

impl<'a> TeamView<'a> {
    pub fn player_ref(&self, index: usize) -> PlayerRef {
        PlayerRef::new(self.slot, index)
    }

    pub fn goalkeeper(&self) -> Option<usize> {
        team::goalkeeper_in(self.players)
    }

    /// A point between the posts of the goal this team attacks.
    pub fn opposing_goal(&self, rng: &mut dyn RngCore) -> Position {
        team::goal_mouth(self.side, rng)
    }

    /// Index of the player closest to `point`.
    pub fn nearest_to(&self, point: &Position) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, p) in self.players.iter().enumerate() {
            let d = p.position.distance(point);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((idx, d));
            }
        }
        best.map(|(idx, _)| idx)
    }
}

/// Everything a strategy sees for one turn.
#[derive(Debug)]
pub struct TurnView<'a> {
    /// The ball holder, always on `attack`.
    pub possession: PlayerRef,
    pub attack: TeamView<'a>,
    pub defence: TeamView<'a>,
    pub opposing_defense: &'a dyn DefensiveStrategy,
}

impl<'a> TurnView<'a> {
    pub fn holder(&self) -> &Player {
        &self.attack.players[self.possession.index]
    }

    pub fn holder_mut(&mut self) -> &mut Player {
        &mut self.attack.players[self.possession.index]
    }

    /// Attacking teammates other than the ball holder, with their indices.
    pub fn teammates(&self) -> impl Iterator<Item = (usize, &Player)> {
        let holder = self.possession.index;
        self.attack
            .players
            .iter()
            .enumerate()
            .filter(move |(idx, _)| *idx != holder)
    }
}
