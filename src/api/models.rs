use serde::Deserialize;
use serde_json::Value;

// /proMatches entry
#[derive(Debug, Deserialize)]
pub struct ProMatchDto {
    pub match_id: i64,
    #[serde(default)]
    pub start_time: Option<i64>,
}

// /matches/{id} response, reduced to the fields the pipeline reads
#[derive(Debug, Deserialize)]
pub struct MatchDto {
    #[serde(default)]
    pub match_id: Option<i64>,
    #[serde(default)]
    pub radiant_win: Option<bool>,
    #[serde(default)]
    pub picks_bans: Option<Vec<PickBanDto>>,
    #[serde(default)]
    pub radiant_team_id: Option<i64>,
    #[serde(default)]
    pub dire_team_id: Option<i64>,
    #[serde(default)]
    pub players: Option<Vec<PlayerDto>>,
}

#[derive(Debug, Deserialize)]
pub struct PickBanDto {
    #[serde(default)]
    pub hero_id: Option<i64>,
    #[serde(default)]
    pub team: Option<i64>,
    #[serde(default)]
    pub is_pick: Option<bool>,
    #[serde(default)]
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerDto {
    #[serde(default)]
    pub player_slot: Option<i64>,
    /// Observer / sentry ward events. Entries are loosely typed upstream and
    /// go through the adapters in `crate::adapt`.
    #[serde(default)]
    pub obs_log: Option<Vec<Value>>,
    #[serde(default)]
    pub sen_log: Option<Vec<Value>>,
    /// Either a map of time -> lane index or a plain list of lane indices.
    #[serde(default)]
    pub lane_pos: Option<Value>,
}

// /teams entry
#[derive(Debug, Deserialize)]
pub struct TeamDto {
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

// /teams/{id}/matches entry
#[derive(Debug, Deserialize)]
pub struct TeamMatchDto {
    pub match_id: i64,
}

// /players/{id}/matches entry
#[derive(Debug, Deserialize)]
pub struct PlayerMatchDto {
    pub match_id: i64,
}
