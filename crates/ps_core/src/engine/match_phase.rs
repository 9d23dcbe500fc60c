//! Match phase flow: regulation halves, then an optional shootout.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    PreKickoff,
    FirstHalf,
    SecondHalf,
    FullTime,
    PenaltyShootout,
    SuddenDeath,
    Finished,
    /// A turn failed; no further play is possible.
    Aborted,
}

impl MatchPhase {
    /// Regulation turns are still being played.
    pub fn is_in_play(self) -> bool {
        matches!(
            self,
            MatchPhase::PreKickoff | MatchPhase::FirstHalf | MatchPhase::SecondHalf
        )
    }
}

/// Advance to the next phase once the current one ends.
///
/// `is_draw` is the score state at the end of the phase (after the regulation
/// shootout rounds for `PenaltyShootout`).
pub fn next_phase(current: MatchPhase, is_draw: bool) -> MatchPhase {
    match current {
        MatchPhase::PreKickoff => MatchPhase::FirstHalf,
        MatchPhase::FirstHalf => MatchPhase::SecondHalf,
        MatchPhase::SecondHalf => MatchPhase::FullTime,
        MatchPhase::FullTime => {
            if is_draw {
                MatchPhase::PenaltyShootout
            } else {
                MatchPhase::Finished
            }
        }
        MatchPhase::PenaltyShootout => {
            if is_draw {
                MatchPhase::SuddenDeath
            } else {
                MatchPhase::Finished
            }
        }
        MatchPhase::SuddenDeath => MatchPhase::Finished,
        MatchPhase::Finished => MatchPhase::Finished,
        MatchPhase::Aborted => MatchPhase::Aborted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regulation_flow_decided() {
        let mut phase = MatchPhase::PreKickoff;
        for expected in [
            MatchPhase::FirstHalf,
            MatchPhase::SecondHalf,
            MatchPhase::FullTime,
            MatchPhase::Finished,
        ] {
            phase = next_phase(phase, false);
            assert_eq!(phase, expected);
        }
    }

    #[test]
    fn test_draw_goes_to_penalties() {
        assert_eq!(
            next_phase(MatchPhase::FullTime, true),
            MatchPhase::PenaltyShootout
        );
        assert_eq!(
            next_phase(MatchPhase::PenaltyShootout, true),
            MatchPhase::SuddenDeath
        );
        assert_eq!(
            next_phase(MatchPhase::PenaltyShootout, false),
            MatchPhase::Finished
        );
        assert_eq!(next_phase(MatchPhase::SuddenDeath, true), MatchPhase::Finished);
    }

    #[test]
    fn test_in_play() {
        assert!(MatchPhase::FirstHalf.is_in_play());
        assert!(!MatchPhase::FullTime.is_in_play());
        assert!(!MatchPhase::Finished.is_in_play());
        assert!(!MatchPhase::Aborted.is_in_play());
        assert_eq!(next_phase(MatchPhase::Aborted, true), MatchPhase::Aborted);
    }
}
