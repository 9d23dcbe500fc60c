//! Match simulator CLI
//!
//! Plays one match and prints its log, runs a JSON match request, or runs a
//! batch of seeds and prints the tally. Logs go to stderr (`RUST_LOG`), the
//! match output to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ps_core::api::roster_rng;
use ps_core::engine::{simulate_batch, MatchConfig, MatchEngine};
use ps_core::models::{create_formation, Formation, Side, Team};
use ps_core::strategies::{defense_by_name, offense_by_name, DEFENSE_NAMES, OFFENSE_NAMES};
use ps_core::MatchError;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const HOME_PLAYERS: [&str; 6] = [
    "Player A", "Player B", "Player C", "Player D", "Player E", "Player F",
];
const AWAY_PLAYERS: [&str; 6] = [
    "Player U", "Player V", "Player W", "Player X", "Player Y", "Player Z",
];

#[derive(Parser)]
#[command(name = "ps_cli")]
#[command(about = "Simulate possession-turn matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match and print the event log
    Simulate {
        /// Match seed (random when omitted; printed to stderr for replay)
        #[arg(long)]
        seed: Option<u64>,

        /// Match config file (.yaml, .yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        teams: TeamArgs,

        /// Print the full match report as JSON instead of the log
        #[arg(long, default_value = "false")]
        json: bool,

        /// Print the SHA-256 of the rendered log after the output
        #[arg(long, default_value = "false")]
        digest: bool,
    },

    /// Run a JSON match request and print the JSON response
    Request {
        /// Request file path
        #[arg(long)]
        file: PathBuf,
    },

    /// Play many seeds in parallel and print the tally
    Batch {
        /// Number of matches
        #[arg(long, default_value_t = 100)]
        runs: u64,

        /// First seed; match i uses seed + i
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Match config file (.yaml, .yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        teams: TeamArgs,
    },
}

#[derive(clap::Args, Clone)]
struct TeamArgs {
    /// Home team name
    #[arg(long, default_value = "Alpha")]
    home: String,

    /// Away team name
    #[arg(long, default_value = "Beta")]
    away: String,

    /// Home attacking strategy (balanced, fast, slow)
    #[arg(long, default_value = "balanced")]
    home_offense: String,

    /// Away attacking strategy (balanced, fast, slow)
    #[arg(long, default_value = "balanced")]
    away_offense: String,

    /// Home defending strategy (zonal, unified, man_to_man)
    #[arg(long, default_value = "zonal")]
    home_defense: String,

    /// Away defending strategy (zonal, unified, man_to_man)
    #[arg(long, default_value = "zonal")]
    away_defense: String,
}

impl TeamArgs {
    /// Both rosters, generated from the roster stream of `seed`.
    fn build(&self, seed: u64) -> ps_core::Result<(Team, Team)> {
        let mut rng = roster_rng(seed);
        let home = build_team(
            &self.home,
            &HOME_PLAYERS,
            &self.home_offense,
            &self.home_defense,
            Side::Right,
            &mut rng,
        )?;
        let away = build_team(
            &self.away,
            &AWAY_PLAYERS,
            &self.away_offense,
            &self.away_defense,
            Side::Left,
            &mut rng,
        )?;
        Ok((home, away))
    }
}

fn build_team(
    name: &str,
    players: &[&str],
    offense: &str,
    defense: &str,
    side: Side,
    rng: &mut dyn rand::RngCore,
) -> ps_core::Result<Team> {
    let offense = offense_by_name(offense).ok_or_else(|| {
        MatchError::InvalidRequest(format!(
            "unknown offensive strategy `{offense}` (expected one of {})",
            OFFENSE_NAMES.join(", ")
        ))
    })?;
    let defense = defense_by_name(defense).ok_or_else(|| {
        MatchError::InvalidRequest(format!(
            "unknown defensive strategy `{defense}` (expected one of {})",
            DEFENSE_NAMES.join(", ")
        ))
    })?;
    let players = create_formation(players, &Formation::standard_six(), side, rng)?;
    Ok(Team::new(name, players, offense, defense, side))
}

fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    let Some(path) = path else {
        return Ok(MatchConfig::standard());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => MatchConfig::from_yaml_str(&text),
        _ => MatchConfig::from_json_str(&text),
    }
    .with_context(|| format!("loading config {}", path.display()))?;
    Ok(config)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            seed,
            config,
            teams,
            json,
            digest,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let config = load_config(config.as_deref())?;
            let (home, away) = teams.build(seed)?;
            eprintln!("seed: {seed}");

            let report = MatchEngine::new(home, away, config, seed)?.simulate()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render());
            }
            if digest {
                println!("digest: {}", report.digest());
            }
        }

        Commands::Request { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading request {}", file.display()))?;
            println!("{}", ps_core::simulate_match_json(&text)?);
        }

        Commands::Batch {
            runs,
            seed,
            config,
            teams,
        } => {
            let config = load_config(config.as_deref())?;
            let seeds: Vec<u64> = (0..runs).map(|i| seed.wrapping_add(i)).collect();
            let (_, summary) = simulate_batch(&seeds, &config, |s| teams.build(s))?;
            println!("{summary}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_simulate_flags() {
        let cli = Cli::try_parse_from([
            "ps_cli",
            "simulate",
            "--seed",
            "7",
            "--home-offense",
            "fast",
            "--away-defense",
            "man-to-man",
            "--digest",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                seed, teams, digest, json, ..
            } => {
                assert_eq!(seed, Some(7));
                assert!(digest);
                assert!(!json);
                let (home, away) = teams.build(7).unwrap();
                assert_eq!(home.offense.name(), "fast");
                assert_eq!(away.defense.name(), "man_to_man");
                assert_eq!(home.players[0].name, "Player A");
                assert_eq!(away.players[5].name, "Player Z");
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_unknown_strategy_is_reported() {
        let cli = Cli::try_parse_from(["ps_cli", "batch", "--home-offense", "route_one"]).unwrap();
        let Commands::Batch { teams, .. } = cli.command else {
            panic!("expected batch");
        };
        let err = teams.build(0).unwrap_err();
        assert!(err.to_string().contains("route_one"));
    }

    #[test]
    fn test_rosters_follow_seed() {
        let teams = TeamArgs {
            home: "Alpha".into(),
            away: "Beta".into(),
            home_offense: "slow".into(),
            away_offense: "balanced".into(),
            home_defense: "unified".into(),
            away_defense: "zonal".into(),
        };
        let (a, _) = teams.build(11).unwrap();
        let (b, _) = teams.build(11).unwrap();
        assert_eq!(a.players, b.players);
    }
}
