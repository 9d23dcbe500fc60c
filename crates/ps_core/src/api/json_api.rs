use serde::{Deserialize, Serialize};

use crate::engine::{MatchConfig, MatchEngine, MatchEvent, ShootoutSummary};
use crate::error::{MatchError, Result};
use crate::models::{create_player, Formation, Player, PlayerRole, Position, Side, Team};
use crate::strategies::{defense_by_name, offense_by_name};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const SCHEMA_VERSION: u8 = 1;

/// ChaCha stream used for generated rosters, kept apart from the match stream.
const ROSTER_STREAM: u64 = 1;

/// RNG for generating rosters from a match seed. Drawing ratings from it
/// leaves the match RNG for the same seed untouched.
pub fn roster_rng(seed: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(ROSTER_STREAM);
    rng
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: TeamData,
    pub away_team: TeamData,
    #[serde(default)]
    pub config: Option<MatchConfig>,
}

#[derive(Debug, Deserialize)]
pub struct TeamData {
    pub name: String,
    /// Direction of attack; home defaults to right, away to left.
    #[serde(default)]
    pub side: Option<SideSpec>,
    #[serde(default = "default_offense")]
    pub offense: String,
    #[serde(default = "default_defense")]
    pub defense: String,
    pub players: Vec<RosterEntry>,
}

/// `"left"` / `"right"`, or the attack direction as a sign.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum SideSpec {
    Named(Side),
    Sign(i8),
}

impl SideSpec {
    pub fn resolve(self) -> std::result::Result<Side, String> {
        match self {
            SideSpec::Named(side) => Ok(side),
            SideSpec::Sign(sign) => {
                Side::from_sign(sign).ok_or_else(|| format!("side sign must be -1 or 1, got {sign}"))
            }
        }
    }
}

/// A role name or alias ("GK", "CF", "striker"...), or a compact role code.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoleSpec {
    Code(u8),
    Name(String),
}

impl RoleSpec {
    pub fn resolve(&self) -> std::result::Result<PlayerRole, String> {
        match self {
            RoleSpec::Code(code) => {
                PlayerRole::from_code(*code).ok_or_else(|| format!("unknown player role code: {code}"))
            }
            RoleSpec::Name(name) => name.parse(),
        }
    }
}

fn default_offense() -> String {
    "balanced".to_string()
}

fn default_defense() -> String {
    "zonal".to_string()
}

/// Roster entry: a bare name (generated ratings, standard six-a-side slot by
/// index) or a fully specified player.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RosterEntry {
    Name(String),
    Player(PlayerData),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerData {
    pub name: String,
    /// "GK", "DF", "DM", "CM", "AM", "SS", "CF" (or a longer alias), or a
    /// role code
    pub role: RoleSpec,
    pub passing: u8,
    pub shooting: u8,
    pub stamina: u8,
    /// Starting spot; the role's slot in the standard formation if omitted.
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub score_home: u32,
    pub score_away: u32,
    pub regulation_home: u32,
    pub regulation_away: u32,
    /// Name of the winning team.
    pub winner: String,
    pub turns: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shootout: Option<ShootoutSummary>,
    pub events: Vec<MatchEvent>,
    /// The rendered log, one line per event.
    pub lines: Vec<String>,
    /// SHA-256 of the rendered log.
    pub digest: String,
}

/// Run a whole match described by a JSON [`MatchRequest`] and return a JSON
/// [`MatchResponse`].
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = simulate_request(request)?;
    Ok(serde_json::to_string(&response)?)
}

pub fn simulate_request(request: MatchRequest) -> Result<MatchResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(MatchError::InvalidRequest(format!(
            "unsupported schema version {} (expected {SCHEMA_VERSION})",
            request.schema_version
        )));
    }

    let MatchRequest {
        seed,
        home_team,
        away_team,
        config,
        ..
    } = request;

    let mut rng = roster_rng(seed);
    let home = convert_team(home_team, Side::Right, &mut rng)?;
    let away = convert_team(away_team, Side::Left, &mut rng)?;

    let report = MatchEngine::new(home, away, config.unwrap_or_default(), seed)?.simulate()?;

    Ok(MatchResponse {
        schema_version: SCHEMA_VERSION,
        seed,
        score_home: report.final_score.home,
        score_away: report.final_score.away,
        regulation_home: report.regulation_score.home,
        regulation_away: report.regulation_score.away,
        winner: report.winner_name.clone(),
        turns: report.turns,
        lines: report.lines(),
        digest: report.digest(),
        shootout: report.shootout,
        events: report.events,
    })
}

fn convert_team(data: TeamData, default_side: Side, rng: &mut ChaCha8Rng) -> Result<Team> {
    let TeamData {
        name,
        side,
        offense,
        defense,
        players,
    } = data;

    let side = match side {
        Some(spec) => spec
            .resolve()
            .map_err(|e| MatchError::InvalidRequest(format!("team `{name}`: {e}")))?,
        None => default_side,
    };
    let offense = offense_by_name(&offense).ok_or_else(|| {
        MatchError::InvalidRequest(format!("team `{name}`: unknown offensive strategy `{offense}`"))
    })?;
    let defense = defense_by_name(&defense).ok_or_else(|| {
        MatchError::InvalidRequest(format!("team `{name}`: unknown defensive strategy `{defense}`"))
    })?;

    let formation = Formation::standard_six();
    let players = players
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| convert_player(entry, idx, &formation, side, rng))
        .collect::<Result<Vec<_>>>()
        .map_err(|e| match e {
            MatchError::InvalidRequest(msg) => {
                MatchError::InvalidRequest(format!("team `{name}`: {msg}"))
            }
            other => other,
        })?;

    Ok(Team::new(name, players, offense, defense, side))
}

fn convert_player(
    entry: RosterEntry,
    idx: usize,
    formation: &Formation,
    side: Side,
    rng: &mut ChaCha8Rng,
) -> Result<Player> {
    match entry {
        RosterEntry::Name(name) => {
            let slot = formation.slots.get(idx).ok_or_else(|| {
                MatchError::InvalidRequest(format!(
                    "player `{name}` has no formation slot ({} available); give full player data",
                    formation.len()
                ))
            })?;
            Ok(create_player(&name, slot.position_for(side), slot.role, rng))
        }
        RosterEntry::Player(data) => {
            let role = data
                .role
                .resolve()
                .map_err(|e| MatchError::InvalidRequest(format!("player `{}`: {e}", data.name)))?;
            let position = match data.position {
                Some(position) => position,
                None => formation
                    .slots
                    .iter()
                    .find(|slot| slot.role == role)
                    .map(|slot| slot.position_for(side))
                    .unwrap_or(Position::CENTRE_SPOT),
            };
            Ok(Player::new(
                data.name,
                data.passing,
                data.shooting,
                data.stamina,
                position,
                role,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EventType;

    fn request(seed: u64) -> String {
        serde_json::json!({
            "schema_version": 1,
            "seed": seed,
            "home_team": {
                "name": "Alpha",
                "offense": "fast",
                "players": ["Player A", "Player B", "Player C", "Player D", "Player E", "Player F"]
            },
            "away_team": {
                "name": "Beta",
                "defense": "man-to-man",
                "players": ["Player U", "Player V", "Player W", "Player X", "Player Y", "Player Z"]
            },
            "config": { "regulation_secs": 1200 }
        })
        .to_string()
    }

    #[test]
    fn test_simulate_match_json_round() {
        let json = simulate_match_json(&request(42)).unwrap();
        let response: MatchResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(response.schema_version, SCHEMA_VERSION);
        assert_eq!(response.lines.len(), response.events.len());
        assert_eq!(response.events.last().unwrap().event_type(), EventType::Victory);
        assert!(response.lines.last().unwrap().contains(&response.winner));
        assert_ne!(response.score_home, response.score_away);
        assert_eq!(response.shootout.is_some(), response.regulation_home == response.regulation_away);
        assert_eq!(response.digest.len(), 64);
    }

    #[test]
    fn test_same_request_same_response() {
        let a = simulate_match_json(&request(7)).unwrap();
        let b = simulate_match_json(&request(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let body = serde_json::json!({
            "schema_version": 1,
            "seed": 3,
            "home_team": {
                "name": "Alpha",
                "players": [
                    { "name": "Keeper", "role": "GK", "passing": 60, "shooting": 40, "stamina": 80 },
                    { "name": "Striker", "role": "striker", "passing": 70, "shooting": 95, "stamina": 90,
                      "position": { "x": -0.1, "y": 0.2 } }
                ]
            },
            "away_team": {
                "name": "Beta",
                "side": "right",
                "players": ["Solo"]
            }
        });
        let err = simulate_match_json(&body.to_string()).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"Invalid request: team `Alpha`: player `Striker`: unknown player role: striker"
        );
    }

    #[test]
    fn test_side_override_conflict() {
        let body = serde_json::json!({
            "schema_version": 1,
            "seed": 3,
            "home_team": { "name": "Alpha", "players": ["A"] },
            "away_team": { "name": "Beta", "side": "right", "players": ["B"] }
        });
        let err = simulate_match_json(&body.to_string()).unwrap_err();
        assert!(matches!(err, MatchError::SameSide { side: Side::Right }));
    }

    #[test]
    fn test_side_sign_and_role_code() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let data: TeamData = serde_json::from_value(serde_json::json!({
            "name": "Alpha",
            "side": -1,
            "players": [
                { "name": "Keeper", "role": 0, "passing": 60, "shooting": 40, "stamina": 80 },
                { "name": "Nine", "role": 33, "passing": 70, "shooting": 90, "stamina": 85 }
            ]
        }))
        .unwrap();
        let team = convert_team(data, Side::Right, &mut rng).unwrap();
        assert_eq!(team.side, Side::Left);
        assert_eq!(team.players[0].role, PlayerRole::Goalkeeper);
        assert_eq!(team.players[1].role, PlayerRole::CentreForward);
        assert_eq!(team.players[1].position, Position::new(0.2, 0.0));

        let body = serde_json::json!({
            "schema_version": 1,
            "seed": 3,
            "home_team": { "name": "Alpha", "side": 0, "players": ["A"] },
            "away_team": { "name": "Beta", "players": ["B"] }
        });
        insta::assert_snapshot!(
            simulate_match_json(&body.to_string()).unwrap_err().to_string(),
            @"Invalid request: team `Alpha`: side sign must be -1 or 1, got 0"
        );

        let body = serde_json::json!({
            "schema_version": 1,
            "seed": 3,
            "home_team": {
                "name": "Alpha",
                "players": [{ "name": "Odd", "role": 2, "passing": 60, "shooting": 40, "stamina": 80 }]
            },
            "away_team": { "name": "Beta", "players": ["B"] }
        });
        insta::assert_snapshot!(
            simulate_match_json(&body.to_string()).unwrap_err().to_string(),
            @"Invalid request: team `Alpha`: player `Odd`: unknown player role code: 2"
        );
    }

    #[test]
    fn test_mixed_roster_converts() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let data: TeamData = serde_json::from_value(serde_json::json!({
            "name": "Alpha",
            "players": [
                "Gen",
                { "name": "Keeper", "role": "goalkeeper", "passing": 60, "shooting": 40, "stamina": 80 }
            ]
        }))
        .unwrap();
        let team = convert_team(data, Side::Left, &mut rng).unwrap();

        assert_eq!(team.offense.name(), "balanced");
        assert_eq!(team.defense.name(), "zonal");
        assert_eq!(team.players[0].role, PlayerRole::CentreForward);
        assert_eq!(team.players[0].position, Position::new(0.2, 0.0));
        assert_eq!(team.players[1].role, PlayerRole::Goalkeeper);
        assert_eq!(team.players[1].position, Position::new(0.8, 0.0));
        assert_eq!(team.goalkeeper(), Some(1));
    }

    #[test]
    fn test_rejects_bad_requests() {
        let wrong_version = request(1).replace("\"schema_version\":1", "\"schema_version\":2");
        insta::assert_snapshot!(
            simulate_match_json(&wrong_version).unwrap_err().to_string(),
            @"Invalid request: unsupported schema version 2 (expected 1)"
        );

        let bad_strategy = request(1).replace("\"fast\"", "\"tiki_taka\"");
        assert!(matches!(
            simulate_match_json(&bad_strategy),
            Err(MatchError::InvalidRequest(msg)) if msg.contains("tiki_taka")
        ));

        assert!(matches!(
            simulate_match_json("{ not json"),
            Err(MatchError::Json(_))
        ));

        let seven = serde_json::json!({
            "schema_version": 1,
            "seed": 0,
            "home_team": { "name": "Alpha", "players": ["1", "2", "3", "4", "5", "6", "7"] },
            "away_team": { "name": "Beta", "players": ["8"] }
        });
        assert!(matches!(
            simulate_match_json(&seven.to_string()),
            Err(MatchError::InvalidRequest(msg)) if msg.contains("`7`")
        ));
    }
}
