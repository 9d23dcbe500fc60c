pub mod batch;
pub mod config;
pub mod events;
pub mod match_phase;
pub mod match_sim;
pub mod moves;
pub mod report;
pub mod shootout;
pub mod strategy;
pub mod text;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use batch::{simulate_batch, BatchSummary};
pub use config::MatchConfig;
pub use events::{render_events, EventKind, EventType, MatchEvent, Scoreline};
pub use match_phase::{next_phase, MatchPhase};
pub use match_sim::MatchEngine;
pub use moves::{Move, MoveResult, SPECIAL_MOVE_SLOTS};
pub use report::MatchReport;
pub use shootout::{
    run_shootout, FixedPenaltyModel, PenaltyKick, PenaltyModel, RatingPenaltyModel,
    ShootoutSummary,
};
pub use strategy::{
    DefensivePosture, DefensiveStrategy, OffensiveStrategy, TeamView, TurnView,
};
