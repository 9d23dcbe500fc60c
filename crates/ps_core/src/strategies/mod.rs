//! Reference strategies and the name registry used by the JSON API and CLI.

mod attack;
mod defense;
pub mod tempo;

pub use attack::{BalancedAttack, FastAttack, SlowAttack};
pub use defense::{ManToManDefense, UnifiedDefense, ZonalDefense};
pub use tempo::{SpecialMoveDef, Tempo};

use crate::engine::strategy::{DefensiveStrategy, OffensiveStrategy};

pub const OFFENSE_NAMES: [&str; 3] = ["balanced", "fast", "slow"];
pub const DEFENSE_NAMES: [&str; 3] = ["zonal", "unified", "man_to_man"];

pub fn offense_by_name(name: &str) -> Option<Box<dyn OffensiveStrategy>> {
    match name.to_ascii_lowercase().as_str() {
        "balanced" => Some(Box::new(BalancedAttack::new())),
        "fast" => Some(Box::new(FastAttack::new())),
        "slow" => Some(Box::new(SlowAttack::new())),
        _ => None,
    }
}

pub fn defense_by_name(name: &str) -> Option<Box<dyn DefensiveStrategy>> {
    match name.to_ascii_lowercase().replace('-', "_").as_str() {
        "zonal" => Some(Box::new(ZonalDefense)),
        "unified" => Some(Box::new(UnifiedDefense)),
        "man_to_man" => Some(Box::new(ManToManDefense)),
        _ => None,
    }
}
