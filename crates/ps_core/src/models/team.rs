use super::{Player, Position};
use crate::engine::strategy::{DefensiveStrategy, OffensiveStrategy};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Attacking direction along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Attacks toward `x = -1`.
    Left,
    /// Attacks toward `x = 1`.
    Right,
}

impl Side {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Side from its attack direction sign (`-1` / `1`).
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            -1 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }
}

/// A named roster plus the two strategies it plays with.
///
/// Only the match engine changes `score`.
#[derive(Debug)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
    pub offense: Box<dyn OffensiveStrategy>,
    pub defense: Box<dyn DefensiveStrategy>,
    pub score: u32,
    pub side: Side,
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        players: Vec<Player>,
        offense: Box<dyn OffensiveStrategy>,
        defense: Box<dyn DefensiveStrategy>,
        side: Side,
    ) -> Self {
        Self {
            name: name.into(),
            players,
            offense,
            defense,
            score: 0,
            side,
        }
    }

    pub fn change_offensive_strategy(&mut self, strategy: Box<dyn OffensiveStrategy>) {
        self.offense = strategy;
    }

    pub fn change_defensive_strategy(&mut self, strategy: Box<dyn DefensiveStrategy>) {
        self.defense = strategy;
    }

    /// Index of the first goalkeeper on the roster.
    pub fn goalkeeper(&self) -> Option<usize> {
        goalkeeper_in(&self.players)
    }

    /// A point on the goal line this team attacks.
    pub fn opposing_goal(&self, rng: &mut dyn RngCore) -> Position {
        goal_mouth(self.side, rng)
    }
}

pub(crate) fn goalkeeper_in(players: &[Player]) -> Option<usize> {
    players.iter().position(|p| p.role.is_goalkeeper())
}

/// Random point between the posts of the goal attacked by `side`.
pub(crate) fn goal_mouth(side: Side, rng: &mut dyn RngCore) -> Position {
    Position::new(side.sign(), rng.gen_range(-0.1..=0.1))
}
