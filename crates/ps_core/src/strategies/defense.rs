use crate::engine::strategy::{DefensivePosture, DefensiveStrategy};

/// Each defender covers an area of the pitch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZonalDefense;

impl DefensiveStrategy for ZonalDefense {
    fn name(&self) -> &str {
        "zonal"
    }

    fn posture(&self) -> DefensivePosture {
        DefensivePosture::Zonal
    }
}

/// The whole team shifts as one compact block.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnifiedDefense;

impl DefensiveStrategy for UnifiedDefense {
    fn name(&self) -> &str {
        "unified"
    }

    fn posture(&self) -> DefensivePosture {
        DefensivePosture::Unified
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ManToManDefense;

impl DefensiveStrategy for ManToManDefense {
    fn name(&self) -> &str {
        "man_to_man"
    }

    fn posture(&self) -> DefensivePosture {
        DefensivePosture::ManToMan
    }
}
