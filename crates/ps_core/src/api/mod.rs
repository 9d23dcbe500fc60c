pub mod json_api;

pub use json_api::{
    roster_rng, simulate_match_json, simulate_request, MatchRequest, MatchResponse, PlayerData,
    RoleSpec, RosterEntry, SideSpec, TeamData, SCHEMA_VERSION,
};
