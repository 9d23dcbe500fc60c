//! Many independent matches at once.
//!
//! Each seed gets its own engine and its own freshly built teams, so the
//! workers share nothing. Results come back in seed order regardless of
//! scheduling.

use super::config::MatchConfig;
use super::match_sim::MatchEngine;
use super::report::MatchReport;
use crate::error::Result;
use crate::models::{Team, TeamSlot};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: u32,
    pub home_wins: u32,
    pub away_wins: u32,
    /// Matches level after regulation.
    pub shootouts: u32,
    pub shootout_home_wins: u32,
    pub mean_goals_home: f64,
    pub mean_goals_away: f64,
    pub mean_turns: f64,
}

impl BatchSummary {
    pub fn from_reports(reports: &[MatchReport]) -> Self {
        let mut summary = Self {
            runs: reports.len() as u32,
            ..Self::default()
        };
        if reports.is_empty() {
            return summary;
        }

        let (mut goals_home, mut goals_away, mut turns) = (0u64, 0u64, 0u64);
        for report in reports {
            match report.winner {
                TeamSlot::Home => summary.home_wins += 1,
                TeamSlot::Away => summary.away_wins += 1,
            }
            if report.went_to_penalties() {
                summary.shootouts += 1;
                if report.winner == TeamSlot::Home {
                    summary.shootout_home_wins += 1;
                }
            }
            // Regulation goals only; shootout makes are not goals from play.
            goals_home += u64::from(report.regulation_score.home);
            goals_away += u64::from(report.regulation_score.away);
            turns += u64::from(report.turns);
        }

        let n = reports.len() as f64;
        summary.mean_goals_home = goals_home as f64 / n;
        summary.mean_goals_away = goals_away as f64 / n;
        summary.mean_turns = turns as f64 / n;
        summary
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "runs:        {}", self.runs)?;
        writeln!(f, "home wins:   {}", self.home_wins)?;
        writeln!(f, "away wins:   {}", self.away_wins)?;
        writeln!(
            f,
            "shootouts:   {} (home won {})",
            self.shootouts, self.shootout_home_wins
        )?;
        writeln!(
            f,
            "mean goals:  {:.2} - {:.2}",
            self.mean_goals_home, self.mean_goals_away
        )?;
        write!(f, "mean turns:  {:.1}", self.mean_turns)
    }
}

/// Simulate one match per seed in parallel.
///
/// `build_teams` is called once per seed, on the worker running that match.
/// The first failing match aborts the batch.
pub fn simulate_batch<F>(
    seeds: &[u64],
    config: &MatchConfig,
    build_teams: F,
) -> Result<(Vec<MatchReport>, BatchSummary)>
where
    F: Fn(u64) -> Result<(Team, Team)> + Sync,
{
    config.validate()?;
    tracing::info!(runs = seeds.len(), "starting batch");

    let reports = seeds
        .par_iter()
        .map(|&seed| {
            let (home, away) = build_teams(seed)?;
            MatchEngine::new(home, away, config.clone(), seed)?.simulate()
        })
        .collect::<Result<Vec<_>>>()?;

    let summary = BatchSummary::from_reports(&reports);
    tracing::info!(
        runs = summary.runs,
        home_wins = summary.home_wins,
        away_wins = summary.away_wins,
        shootouts = summary.shootouts,
        "batch finished"
    );
    Ok((reports, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::moves::{Move, MoveResult};
    use crate::engine::strategy::{OffensiveStrategy, TurnView};
    use crate::engine::test_fixtures::team_pair;
    use crate::error::MatchError;
    use rand::RngCore;

    #[derive(Debug)]
    struct HoldBall;

    impl OffensiveStrategy for HoldBall {
        fn name(&self) -> &str {
            "hold_ball"
        }

        fn pick_move(&self, _turn: &TurnView<'_>, _rng: &mut dyn RngCore) -> anyhow::Result<Move> {
            Ok(Move::Wait)
        }

        fn resolve_move(
            &self,
            _mv: Move,
            _turn: &mut TurnView<'_>,
            _rng: &mut dyn RngCore,
        ) -> anyhow::Result<MoveResult> {
            Ok(MoveResult::nothing(150))
        }
    }

    fn pair(_seed: u64) -> Result<(Team, Team)> {
        let [home, away] = team_pair();
        Ok((home, away))
    }

    #[test]
    fn test_batch_is_ordered_and_deterministic() {
        let seeds: Vec<u64> = (0..16).collect();
        let config = MatchConfig::short(10);
        let (first, summary) = simulate_batch(&seeds, &config, pair).unwrap();
        let (second, _) = simulate_batch(&seeds, &config, pair).unwrap();

        assert_eq!(summary.runs, 16);
        assert_eq!(summary.home_wins + summary.away_wins, 16);
        let seeds_back: Vec<Option<u64>> = first.iter().map(|r| r.seed).collect();
        assert_eq!(seeds_back, seeds.iter().copied().map(Some).collect::<Vec<_>>());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.digest(), b.digest());
        }
    }

    #[test]
    fn test_mirror_shootouts_are_fair() {
        // Identical rosters that never shoot: every match is decided on
        // penalties, with only the uniform first-kicker draw to tell them apart.
        let seeds: Vec<u64> = (0..1000).collect();
        let (_, summary) = simulate_batch(&seeds, &MatchConfig::short(5), |_| {
            let [mut home, mut away] = team_pair();
            away.players = home
                .players
                .iter()
                .map(|p| {
                    let mut p = p.clone();
                    p.name = p.name.replace("Alpha", "Beta");
                    p
                })
                .collect();
            home.change_offensive_strategy(Box::new(HoldBall));
            away.change_offensive_strategy(Box::new(HoldBall));
            Ok((home, away))
        })
        .unwrap();

        assert_eq!(summary.shootouts, 1000);
        let share = summary.shootout_home_wins as f64 / 1000.0;
        assert!((0.44..=0.56).contains(&share), "home share {share}");
        assert_eq!(summary.mean_goals_home, 0.0);
    }

    #[test]
    fn test_builder_error_aborts_batch() {
        let err = simulate_batch(&[1, 2, 3], &MatchConfig::short(5), |seed| {
            if seed == 2 {
                Err(MatchError::InvalidRequest("no roster for seed 2".into()))
            } else {
                pair(seed)
            }
        })
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidRequest(_)));
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::from_reports(&[]);
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.mean_turns, 0.0);
    }
}
