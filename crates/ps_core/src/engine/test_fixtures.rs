//! Shared rosters for unit tests.

use crate::models::{Formation, Player, Side, Team};
use crate::strategies::{BalancedAttack, ZonalDefense};

/// Six players named `{prefix}1..{prefix}6` in the standard formation, with
/// fixed ratings so tests do not depend on roster generation.
pub(crate) fn six_players(prefix: &str, side: Side) -> Vec<Player> {
    Formation::standard_six()
        .slots
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let rating = 70 + (idx as u8) * 4;
            Player::new(
                format!("{prefix}{}", idx + 1),
                rating,
                rating,
                90,
                slot.position_for(side),
                slot.role,
            )
        })
        .collect()
}

/// "Alpha" (home, attacking right) against "Beta" (away, attacking left).
pub(crate) fn team_pair() -> [Team; 2] {
    [
        Team::new(
            "Alpha",
            six_players("Alpha ", Side::Right),
            Box::new(BalancedAttack::new()),
            Box::new(ZonalDefense),
            Side::Right,
        ),
        Team::new(
            "Beta",
            six_players("Beta ", Side::Left),
            Box::new(BalancedAttack::new()),
            Box::new(ZonalDefense),
            Side::Left,
        ),
    ]
}

/// [`team_pair`] with both teams already on `score`.
pub(crate) fn level_teams(score: u32) -> [Team; 2] {
    let mut teams = team_pair();
    for team in &mut teams {
        team.score = score;
    }
    teams
}
