use super::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two match slots a team occupies. Team 1 is `Home`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSlot {
    Home,
    Away,
}

impl TeamSlot {
    pub fn other(self) -> Self {
        match self {
            TeamSlot::Home => TeamSlot::Away,
            TeamSlot::Away => TeamSlot::Home,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            TeamSlot::Home => 0,
            TeamSlot::Away => 1,
        }
    }
}

/// Identity of a player for the duration of a match.
///
/// Players are never compared by name (rosters may repeat names); the engine
/// and the strategies hand these references around instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub team: TeamSlot,
    pub index: usize,
}

impl PlayerRef {
    pub const fn new(team: TeamSlot, index: usize) -> Self {
        Self { team, index }
    }
}

impl fmt::Display for PlayerRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}#{}", self.team, self.index)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerRole {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DF")]
    Defender,
    #[serde(rename = "DM")]
    DefensiveMidfielder,
    #[serde(rename = "CM")]
    CentralMidfielder,
    #[serde(rename = "AM")]
    OffensiveMidfielder,
    #[serde(rename = "SS")]
    SecondStriker,
    #[serde(rename = "CF")]
    CentreForward,
}

impl PlayerRole {
    /// Decode the compact role codes used by saved rosters
    /// (0 = goalkeeper, 1 = defence, 16..=18 midfield, 32..=33 attack).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PlayerRole::Goalkeeper),
            1 => Some(PlayerRole::Defender),
            16 => Some(PlayerRole::OffensiveMidfielder),
            17 => Some(PlayerRole::DefensiveMidfielder),
            18 => Some(PlayerRole::CentralMidfielder),
            32 => Some(PlayerRole::SecondStriker),
            33 => Some(PlayerRole::CentreForward),
            _ => None,
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, PlayerRole::Goalkeeper)
    }
}

impl FromStr for PlayerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GK" | "GOALKEEPER" | "GOALIE" => Ok(PlayerRole::Goalkeeper),
            "DF" | "DEFENDER" => Ok(PlayerRole::Defender),
            "DM" | "CDM" => Ok(PlayerRole::DefensiveMidfielder),
            "CM" | "MF" => Ok(PlayerRole::CentralMidfielder),
            "AM" | "CAM" => Ok(PlayerRole::OffensiveMidfielder),
            "SS" => Ok(PlayerRole::SecondStriker),
            "CF" | "ST" | "FW" => Ok(PlayerRole::CentreForward),
            _ => Err(format!("unknown player role: {s}")),
        }
    }
}

/// A player for the duration of one match.
///
/// Ratings are on a 0..=100 scale. Strategies may tire players and move them
/// around; the engine only touches `possession_time`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub passing: u8,
    pub shooting: u8,
    pub max_stamina: u8,
    pub stamina: u8,
    pub position: Position,
    pub role: PlayerRole,
    /// Seconds this player has spent on the ball.
    #[serde(default)]
    pub possession_time: u32,
}

impl Player {
    pub fn new(
        name: impl Into<String>,
        passing: u8,
        shooting: u8,
        stamina: u8,
        position: Position,
        role: PlayerRole,
    ) -> Self {
        Self {
            name: name.into(),
            passing: passing.min(100),
            shooting: shooting.min(100),
            max_stamina: stamina,
            stamina,
            position,
            role,
            possession_time: 0,
        }
    }

    /// Index of the nearest player among `others`, or `None` when empty.
    /// Ties keep the first candidate.
    pub fn nearest<'a>(&self, others: impl IntoIterator<Item = (usize, &'a Player)>) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, other) in others {
            let d = self.position.distance(&other.position);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((idx, d)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// 0.5 when exhausted, 1.0 when fresh.
    pub fn stamina_factor(&self) -> f32 {
        if self.max_stamina == 0 {
            return 0.5;
        }
        0.5 + 0.5 * (self.stamina as f32 / self.max_stamina as f32)
    }

    pub fn effective_passing(&self) -> f32 {
        self.passing as f32 * self.stamina_factor()
    }

    pub fn effective_shooting(&self) -> f32 {
        self.shooting as f32 * self.stamina_factor()
    }

    /// Mean of both effective ratings.
    pub fn effective_overall(&self) -> f32 {
        (self.effective_passing() + self.effective_shooting()) / 2.0
    }

    pub fn tire(&mut self, amount: u8) {
        self.stamina = self.stamina.saturating_sub(amount);
    }

    pub fn recover(&mut self, amount: u8) {
        self.stamina = self.stamina.saturating_add(amount).min(self.max_stamina);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}
