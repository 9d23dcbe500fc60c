use thiserror::Error;

use crate::models::Side;

/// Every way a match can fail. There is no recoverable class: a simulation
/// either returns its full report or one of these.
#[derive(Error, Debug)]
pub enum MatchError {
    // ------------------------------------------------------------------
    // Degenerate configuration (detected before kickoff)
    // ------------------------------------------------------------------
    #[error("Team `{team}` has an empty roster")]
    EmptyRoster { team: String },

    #[error("Both teams are named `{0}`")]
    IdenticalTeams(String),

    #[error("Both teams attack in the same direction ({side:?})")]
    SameSide { side: Side },

    #[error("Invalid match config: {0}")]
    InvalidConfig(String),

    #[error("Formation has {slots} slots but {names} names were given")]
    FormationMismatch { slots: usize, names: usize },

    // ------------------------------------------------------------------
    // Strategy contract violations (fatal, no partial turn applied)
    // ------------------------------------------------------------------
    #[error("Strategy `{strategy}` returned unknown move code {code}")]
    UnknownMove { strategy: String, code: u8 },

    #[error("Strategy `{strategy}` reported {elapsed}s elapsed; a turn must take at least 1s")]
    InvalidElapsed { strategy: String, elapsed: u32 },

    #[error("Strategy `{strategy}` broke the move contract: {reason}")]
    Contract { strategy: String, reason: String },

    #[error("Strategy `{strategy}` failed: {source}")]
    Strategy {
        strategy: String,
        #[source]
        source: anyhow::Error,
    },

    // ------------------------------------------------------------------
    // Host-imposed limits
    // ------------------------------------------------------------------
    #[error("Turn limit of {limit} reached at {clock}s")]
    TurnLimitExceeded { limit: u32, clock: u32 },

    #[error("Penalty shootout still level after {rounds} sudden-death rounds")]
    ShootoutUndecided { rounds: u32 },

    #[error("Match is already finished")]
    AlreadyFinished,

    #[error("Match was aborted after an earlier failure: {reason}")]
    Aborted { reason: String },

    // ------------------------------------------------------------------
    // API surface
    // ------------------------------------------------------------------
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MatchError {
    /// True for errors caused by a strategy breaking the engine contract
    /// (as opposed to bad input or a failing strategy computation).
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            MatchError::UnknownMove { .. }
                | MatchError::InvalidElapsed { .. }
                | MatchError::Contract { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
