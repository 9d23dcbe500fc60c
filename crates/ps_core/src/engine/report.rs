use super::events::{render_events, EventType, MatchEvent, Scoreline};
use super::shootout::ShootoutSummary;
use crate::models::TeamSlot;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Everything a finished match produced. `events` is the authoritative
/// output; the other fields are summaries of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Seed the match RNG was built from, when the engine created it.
    pub seed: Option<u64>,
    pub home_name: String,
    pub away_name: String,
    /// Score at the end of regulation, before any shootout kicks.
    pub regulation_score: Scoreline,
    pub final_score: Scoreline,
    pub winner: TeamSlot,
    pub winner_name: String,
    pub turns: u32,
    pub possession_home_secs: u32,
    pub possession_away_secs: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shootout: Option<ShootoutSummary>,
    pub events: Vec<MatchEvent>,
}

impl MatchReport {
    /// The match log, one `M:SS - message` line per event.
    pub fn render(&self) -> String {
        render_events(&self.events)
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    /// SHA-256 of the rendered log. Equal seeds give equal digests.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.render().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn count(&self, event_type: EventType) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .count()
    }

    pub fn went_to_penalties(&self) -> bool {
        self.shootout.is_some()
    }
}
