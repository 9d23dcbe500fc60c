//! # ps_core - Possession-Turn Match Simulator
//!
//! Two teams trade possession turn by turn until regulation time runs out;
//! a level score goes to a penalty shootout. Teams plug in their own
//! attacking and defending strategies.
//!
//! ## Features
//! - Deterministic: same teams, config and seed give the same event log
//! - Pluggable strategies behind [`engine::OffensiveStrategy`] and
//!   [`engine::DefensiveStrategy`]
//! - Step-by-step driving with strategy swaps between turns
//! - JSON API and parallel batch runs

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Complex types are sometimes necessary for generic APIs
#![allow(clippy::type_complexity)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod strategies;

pub use api::{simulate_match_json, MatchRequest, MatchResponse};
pub use engine::{MatchConfig, MatchEngine, MatchReport};
pub use error::{MatchError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
