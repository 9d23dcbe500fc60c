//! The vocabulary a strategy and the engine exchange for one turn.

use crate::models::PlayerRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of special slots a strategy may define (`Special(0)..=Special(7)`).
pub const SPECIAL_MOVE_SLOTS: u8 = 8;

/// Wire code of `Special(0)`; slot `k` encodes as `SPECIAL_CODE_BASE + k`.
const SPECIAL_CODE_BASE: u8 = 128;

/// What the ball holder tries this turn.
///
/// The engine treats every `Special` slot the same way: an opaque action
/// the owning strategy names and resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Wait,
    BasicGoal,
    BasicPass,
    Special(u8),
}

impl Move {
    pub fn code(self) -> u8 {
        match self {
            Move::Wait => 0,
            Move::BasicGoal => 1,
            Move::BasicPass => 2,
            Move::Special(slot) => SPECIAL_CODE_BASE.saturating_add(slot),
        }
    }

    /// Decode a wire code. Unknown codes (including special slots past
    /// [`SPECIAL_MOVE_SLOTS`]) yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Move::Wait),
            1 => Some(Move::BasicGoal),
            2 => Some(Move::BasicPass),
            c if (SPECIAL_CODE_BASE..SPECIAL_CODE_BASE + SPECIAL_MOVE_SLOTS).contains(&c) => {
                Some(Move::Special(c - SPECIAL_CODE_BASE))
            }
            _ => None,
        }
    }

    pub fn is_special(self) -> bool {
        matches!(self, Move::Special(_))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Move::Wait => f.write_str("wait"),
            Move::BasicGoal => f.write_str("goal"),
            Move::BasicPass => f.write_str("pass"),
            Move::Special(slot) => write!(f, "special{slot}"),
        }
    }
}

/// Outcome of resolving a [`Move`].
///
/// # Contract
/// - `elapsed >= 1`; the engine rejects anything else before applying the turn.
/// - `new_possession == None` leaves possession where it was.
/// - `target` is the intended receiver of a pass. A completed pass without a
///   target is narrated with the new ball holder as receiver.
/// - A non-empty `co_actors` turns a special move into its multi-player form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub scored: bool,
    pub elapsed: u32,
    pub new_possession: Option<PlayerRef>,
    pub target: Option<PlayerRef>,
    pub co_actors: Vec<PlayerRef>,
}

impl MoveResult {
    /// Nothing happened except the clock running.
    pub fn nothing(elapsed: u32) -> Self {
        Self {
            scored: false,
            elapsed,
            new_possession: None,
            target: None,
            co_actors: Vec::new(),
        }
    }

    pub fn pass_completed(receiver: PlayerRef, elapsed: u32) -> Self {
        Self {
            new_possession: Some(receiver),
            target: Some(receiver),
            ..Self::nothing(elapsed)
        }
    }

    pub fn pass_intercepted(intended: PlayerRef, interceptor: PlayerRef, elapsed: u32) -> Self {
        Self {
            new_possession: Some(interceptor),
            target: Some(intended),
            ..Self::nothing(elapsed)
        }
    }

    /// A shot at goal; `next_holder` is whoever restarts play afterwards.
    pub fn shot(scored: bool, next_holder: Option<PlayerRef>, elapsed: u32) -> Self {
        Self {
            scored,
            new_possession: next_holder,
            ..Self::nothing(elapsed)
        }
    }

    pub fn with_co_actors(mut self, co_actors: Vec<PlayerRef>) -> Self {
        self.co_actors = co_actors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamSlot;

    #[test]
    fn test_move_codes() {
        assert_eq!(Move::Wait.code(), 0);
        assert_eq!(Move::Special(1).code(), 129);
        assert_eq!(Move::from_code(135), Some(Move::Special(7)));
        assert_eq!(Move::from_code(136), None);
        assert_eq!(Move::from_code(3), None);
        for code in [0u8, 1, 2, 128, 131] {
            assert_eq!(Move::from_code(code).map(Move::code), Some(code));
        }
    }

    #[test]
    fn test_pass_constructors_set_target() {
        let a = PlayerRef::new(TeamSlot::Home, 2);
        let b = PlayerRef::new(TeamSlot::Away, 4);

        let done = MoveResult::pass_completed(a, 5);
        assert_eq!(done.new_possession, Some(a));
        assert_eq!(done.target, Some(a));
        assert!(!done.scored);

        let lost = MoveResult::pass_intercepted(a, b, 6);
        assert_eq!(lost.new_possession, Some(b));
        assert_eq!(lost.target, Some(a));
        assert_eq!(lost.elapsed, 6);
    }

    #[test]
    fn test_nothing_keeps_possession() {
        let r = MoveResult::nothing(20);
        assert!(r.new_possession.is_none());
        assert!(r.co_actors.is_empty());
    }
}
