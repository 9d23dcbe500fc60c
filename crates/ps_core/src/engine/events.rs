//! Match event model and its text rendering.
//!
//! Every event is an immutable record of something that happened at a given
//! second of the match. Player and team names are copied into the event when
//! it is created, so a log renders the same way no matter what happens to the
//! teams afterwards.
//!
//! ## Rendering
//!
//! `M:SS - <message>`, seconds zero-padded:
//!
//! ```text
//! 1:35 - Player A goes for the goal and scores! The score is now 1 - 0.
//! ```

use super::moves::Move;
use super::text::{clock, english_list, with_article};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score snapshot, home (team 1) first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Scoreline {
    pub home: u32,
    pub away: u32,
}

impl Scoreline {
    pub const fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn is_level(&self) -> bool {
        self.home == self.away
    }
}

impl fmt::Display for Scoreline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.home, self.away)
    }
}

/// Fieldless discriminant of [`EventKind`].
///
/// `None` classifies turns with nothing to narrate (WAIT); no event of that
/// type is ever stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    None,
    Pass,
    Intercept,
    Goal,
    MissedGoal,
    SpecialMove,
    SpecialMoveScore,
    MultiSpecialMove,
    MultiSpecialMoveScore,
    HalfTime,
    End,
    EnterPenalty,
    Penalty,
    MissedPenalty,
    Victory,
}

impl EventType {
    /// Event type of a resolved turn.
    pub fn classify(mv: Move, scored: bool, multi_player: bool) -> Self {
        match (mv, scored) {
            (Move::Wait, _) => EventType::None,
            (Move::BasicPass, true) => EventType::Pass,
            (Move::BasicPass, false) => EventType::Intercept,
            (Move::BasicGoal, true) => EventType::Goal,
            (Move::BasicGoal, false) => EventType::MissedGoal,
            (Move::Special(_), true) if multi_player => EventType::MultiSpecialMoveScore,
            (Move::Special(_), false) if multi_player => EventType::MultiSpecialMove,
            (Move::Special(_), true) => EventType::SpecialMoveScore,
            (Move::Special(_), false) => EventType::SpecialMove,
        }
    }

    /// Event types that add one to a team's score.
    pub fn is_scoring(self) -> bool {
        matches!(
            self,
            EventType::Goal
                | EventType::SpecialMoveScore
                | EventType::MultiSpecialMoveScore
                | EventType::Penalty
        )
    }

    pub fn is_shootout(self) -> bool {
        matches!(
            self,
            EventType::EnterPenalty | EventType::Penalty | EventType::MissedPenalty
        )
    }
}

/// What happened, with exactly the fields each kind needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Pass {
        player: String,
        target: String,
    },
    Intercept {
        player: String,
        target: String,
        interceptor: String,
    },
    Goal {
        player: String,
        score: Scoreline,
    },
    MissedGoal {
        player: String,
    },
    SpecialMove {
        player: String,
        name: String,
    },
    SpecialMoveScore {
        player: String,
        name: String,
        score: Scoreline,
    },
    MultiSpecialMove {
        players: Vec<String>,
        name: String,
    },
    MultiSpecialMoveScore {
        players: Vec<String>,
        name: String,
        score: Scoreline,
    },
    HalfTime,
    End,
    EnterPenalty,
    Penalty {
        player: String,
        team: String,
        score: Scoreline,
    },
    MissedPenalty {
        player: String,
        team: String,
    },
    Victory {
        team: String,
        score: Scoreline,
    },
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Pass { .. } => EventType::Pass,
            EventKind::Intercept { .. } => EventType::Intercept,
            EventKind::Goal { .. } => EventType::Goal,
            EventKind::MissedGoal { .. } => EventType::MissedGoal,
            EventKind::SpecialMove { .. } => EventType::SpecialMove,
            EventKind::SpecialMoveScore { .. } => EventType::SpecialMoveScore,
            EventKind::MultiSpecialMove { .. } => EventType::MultiSpecialMove,
            EventKind::MultiSpecialMoveScore { .. } => EventType::MultiSpecialMoveScore,
            EventKind::HalfTime => EventType::HalfTime,
            EventKind::End => EventType::End,
            EventKind::EnterPenalty => EventType::EnterPenalty,
            EventKind::Penalty { .. } => EventType::Penalty,
            EventKind::MissedPenalty { .. } => EventType::MissedPenalty,
            EventKind::Victory { .. } => EventType::Victory,
        }
    }

    /// Score snapshot carried by the event, if any.
    pub fn score(&self) -> Option<Scoreline> {
        match self {
            EventKind::Goal { score, .. }
            | EventKind::SpecialMoveScore { score, .. }
            | EventKind::MultiSpecialMoveScore { score, .. }
            | EventKind::Penalty { score, .. }
            | EventKind::Victory { score, .. } => Some(*score),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            EventKind::Pass { player, target } => format!("{player} passes to {target}"),
            EventKind::Intercept {
                player,
                target,
                interceptor,
            } => format!("{player} passes to {target}, but {interceptor} intercepts!"),
            EventKind::Goal { player, score } => {
                format!("{player} goes for the goal and scores! The score is now {score}.")
            }
            EventKind::MissedGoal { player } => format!("{player} goes for the goal and misses!"),
            EventKind::SpecialMove { player, name } => {
                format!("{player} goes for {}!", with_article(name))
            }
            EventKind::SpecialMoveScore {
                player,
                name,
                score,
            } => format!(
                "{player} goes for {} and scores! The score is now {score}.",
                with_article(name)
            ),
            EventKind::MultiSpecialMove { players, name } => {
                format!("{} go for {}!", english_list(players), with_article(name))
            }
            EventKind::MultiSpecialMoveScore {
                players,
                name,
                score,
            } => format!(
                "{} go for {} and score! The score is now {score}.",
                english_list(players),
                with_article(name)
            ),
            EventKind::HalfTime => "The game is now in halftime!".to_string(),
            EventKind::End => "The game is over!".to_string(),
            EventKind::EnterPenalty => {
                "The game is over, but we're tied! It's time for penalty kicks!".to_string()
            }
            EventKind::Penalty { player, score, .. } => format!(
                "{player} goes for the penalty kick and makes it! The score is now {score}."
            ),
            EventKind::MissedPenalty { player, .. } => {
                format!("{player} goes for the penalty kick and misses!")
            }
            EventKind::Victory { team, score } => format!("{team} wins, with a score of {score}."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Seconds since kickoff.
    pub time: u32,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl MatchEvent {
    pub fn new(time: u32, kind: EventKind) -> Self {
        Self { time, kind }
    }

    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", clock(self.time), self.kind.message())
    }
}

/// One rendered line per event, newline separated.
pub fn render_events(events: &[MatchEvent]) -> String {
    events
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
