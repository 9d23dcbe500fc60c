//! Roster construction helpers.
//!
//! Formations are laid out for a team attacking toward `x = 1`; a team
//! attacking the other way gets every slot mirrored.

use super::{Player, PlayerRole, Position, Side};
use crate::error::{MatchError, Result};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Rating range used for generated players.
const RATING_MIN: u8 = 60;
const RATING_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormationSlot {
    pub position: Position,
    pub role: PlayerRole,
}

impl FormationSlot {
    /// Slot position for a team attacking toward `side`.
    pub fn position_for(&self, side: Side) -> Position {
        match side {
            Side::Right => self.position,
            Side::Left => self.position.mirrored(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub slots: Vec<FormationSlot>,
}

impl Formation {
    pub fn new(slots: Vec<FormationSlot>) -> Self {
        Self { slots }
    }

    /// Six-a-side: centre forward, second striker, two central midfielders,
    /// one defender, goalkeeper.
    pub fn standard_six() -> Self {
        let slot = |x: f32, y: f32, role| FormationSlot {
            position: Position::new(x, y),
            role,
        };
        Self::new(vec![
            slot(-0.2, 0.0, PlayerRole::CentreForward),
            slot(-0.3, 0.0, PlayerRole::SecondStriker),
            slot(-0.4, -0.5, PlayerRole::CentralMidfielder),
            slot(-0.4, 0.5, PlayerRole::CentralMidfielder),
            slot(-0.6, 0.0, PlayerRole::Defender),
            slot(-0.8, 0.0, PlayerRole::Goalkeeper),
        ])
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Build a player with ratings drawn from the match RNG.
pub fn create_player(
    name: &str,
    position: Position,
    role: PlayerRole,
    rng: &mut dyn RngCore,
) -> Player {
    let passing = rng.gen_range(RATING_MIN..=RATING_MAX);
    let shooting = rng.gen_range(RATING_MIN..=RATING_MAX);
    let stamina = rng.gen_range(RATING_MIN..=RATING_MAX);
    Player::new(name, passing, shooting, stamina, position, role)
}

/// One generated player per name, placed on the matching formation slot.
pub fn create_formation<S: AsRef<str>>(
    names: &[S],
    formation: &Formation,
    side: Side,
    rng: &mut dyn RngCore,
) -> Result<Vec<Player>> {
    if names.len() != formation.len() {
        return Err(MatchError::FormationMismatch {
            slots: formation.len(),
            names: names.len(),
        });
    }

    Ok(names
        .iter()
        .zip(&formation.slots)
        .map(|(name, slot)| create_player(name.as_ref(), slot.position_for(side), slot.role, rng))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

    #[test]
    fn test_standard_six_has_one_keeper() {
        let f = Formation::standard_six();
        assert_eq!(f.len(), 6);
        assert_eq!(f.slots.iter().filter(|s| s.role.is_goalkeeper()).count(), 1);
    }

    #[test]
    fn test_create_formation_ratings_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let players = create_formation(&NAMES, &Formation::standard_six(), Side::Right, &mut rng).unwrap();
        assert_eq!(players.len(), 6);
        for p in &players {
            assert!((RATING_MIN..=RATING_MAX).contains(&p.passing));
            assert!((RATING_MIN..=RATING_MAX).contains(&p.shooting));
            assert_eq!(p.stamina, p.max_stamina);
        }
        assert_eq!(players[5].role, PlayerRole::Goalkeeper);
        assert_eq!(players[0].position, Position::new(-0.2, 0.0));
    }

    #[test]
    fn test_left_side_is_mirrored() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let players = create_formation(&NAMES, &Formation::standard_six(), Side::Left, &mut rng).unwrap();
        assert_eq!(players[5].position, Position::new(0.8, 0.0));
    }

    #[test]
    fn test_mismatched_names_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = create_formation(&["Solo"], &Formation::standard_six(), Side::Right, &mut rng).unwrap_err();
        assert!(matches!(err, MatchError::FormationMismatch { slots: 6, names: 1 }));
    }
}
