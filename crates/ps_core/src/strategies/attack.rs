//! Reference attacking strategies.

use super::tempo::{self, SpecialMoveDef, Tempo};
use crate::engine::moves::{Move, MoveResult};
use crate::engine::strategy::{OffensiveStrategy, TurnView};
use rand::RngCore;

const LONG_GOAL: SpecialMoveDef = SpecialMoveDef {
    slot: 1,
    name: "long goal",
    difficulty: 0.5,
    needs_partner: false,
    secs: (8, 15),
};

const ONE_TWO: SpecialMoveDef = SpecialMoveDef {
    slot: 2,
    name: "one-two",
    difficulty: 1.4,
    needs_partner: true,
    secs: (4, 8),
};

const SET_PLAY: SpecialMoveDef = SpecialMoveDef {
    slot: 3,
    name: "rehearsed set play",
    difficulty: 1.2,
    needs_partner: true,
    secs: (20, 40),
};

// ============================================================================
// BalancedAttack
// ============================================================================

/// Picks uniformly between waiting, passing, shooting and a long-range shot.
#[derive(Debug, Clone)]
pub struct BalancedAttack {
    tempo: Tempo,
    specials: [SpecialMoveDef; 1],
}

impl BalancedAttack {
    const MOVES: [(Move, u32); 4] = [
        (Move::Wait, 1),
        (Move::BasicGoal, 1),
        (Move::BasicPass, 1),
        (Move::Special(1), 1),
    ];

    pub fn new() -> Self {
        Self {
            tempo: Tempo::BALANCED,
            specials: [LONG_GOAL],
        }
    }
}

impl Default for BalancedAttack {
    fn default() -> Self {
        Self::new()
    }
}

impl OffensiveStrategy for BalancedAttack {
    fn name(&self) -> &str {
        "balanced"
    }

    fn pick_move(&self, turn: &TurnView<'_>, rng: &mut dyn RngCore) -> anyhow::Result<Move> {
        tempo::pick_weighted(turn, &Self::MOVES, &self.specials, rng)
    }

    fn resolve_move(
        &self,
        mv: Move,
        turn: &mut TurnView<'_>,
        rng: &mut dyn RngCore,
    ) -> anyhow::Result<MoveResult> {
        tempo::resolve(&self.tempo, &self.specials, mv, turn, rng)
    }

    fn special_move_name(&self, slot: u8) -> Option<&str> {
        tempo::find_special(&self.specials, slot).map(|def| def.name)
    }
}

// ============================================================================
// FastAttack
// ============================================================================

/// High tempo: short actions, rarely holds the ball, likes the one-two.
#[derive(Debug, Clone)]
pub struct FastAttack {
    tempo: Tempo,
    specials: [SpecialMoveDef; 2],
}

impl FastAttack {
    const MOVES: [(Move, u32); 5] = [
        (Move::Wait, 1),
        (Move::BasicPass, 4),
        (Move::BasicGoal, 3),
        (Move::Special(1), 1),
        (Move::Special(2), 2),
    ];

    pub fn new() -> Self {
        Self {
            tempo: Tempo::FAST,
            specials: [LONG_GOAL, ONE_TWO],
        }
    }
}

impl Default for FastAttack {
    fn default() -> Self {
        Self::new()
    }
}

impl OffensiveStrategy for FastAttack {
    fn name(&self) -> &str {
        "fast"
    }

    fn pick_move(&self, turn: &TurnView<'_>, rng: &mut dyn RngCore) -> anyhow::Result<Move> {
        tempo::pick_weighted(turn, &Self::MOVES, &self.specials, rng)
    }

    fn resolve_move(
        &self,
        mv: Move,
        turn: &mut TurnView<'_>,
        rng: &mut dyn RngCore,
    ) -> anyhow::Result<MoveResult> {
        tempo::resolve(&self.tempo, &self.specials, mv, turn, rng)
    }

    fn special_move_name(&self, slot: u8) -> Option<&str> {
        tempo::find_special(&self.specials, slot).map(|def| def.name)
    }
}

// ============================================================================
// SlowAttack
// ============================================================================

/// Patient build-up: long spells on the ball, pass-heavy, few shots.
#[derive(Debug, Clone)]
pub struct SlowAttack {
    tempo: Tempo,
    specials: [SpecialMoveDef; 2],
}

impl SlowAttack {
    const MOVES: [(Move, u32); 5] = [
        (Move::Wait, 4),
        (Move::BasicPass, 5),
        (Move::BasicGoal, 2),
        (Move::Special(1), 1),
        (Move::Special(3), 1),
    ];

    pub fn new() -> Self {
        Self {
            tempo: Tempo::SLOW,
            specials: [LONG_GOAL, SET_PLAY],
        }
    }
}

impl Default for SlowAttack {
    fn default() -> Self {
        Self::new()
    }
}

impl OffensiveStrategy for SlowAttack {
    fn name(&self) -> &str {
        "slow"
    }

    fn pick_move(&self, turn: &TurnView<'_>, rng: &mut dyn RngCore) -> anyhow::Result<Move> {
        tempo::pick_weighted(turn, &Self::MOVES, &self.specials, rng)
    }

    fn resolve_move(
        &self,
        mv: Move,
        turn: &mut TurnView<'_>,
        rng: &mut dyn RngCore,
    ) -> anyhow::Result<MoveResult> {
        tempo::resolve(&self.tempo, &self.specials, mv, turn, rng)
    }

    fn special_move_name(&self, slot: u8) -> Option<&str> {
        tempo::find_special(&self.specials, slot).map(|def| def.name)
    }
}
