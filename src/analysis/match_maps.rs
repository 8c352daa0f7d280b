//! Per-player ward and position extraction from a full match record.

use serde_json::Value;

use crate::adapt;
use crate::api::models::{MatchDto, PlayerDto};
use crate::coords::{MAP_SIZE_X, MAP_SIZE_Y};
use crate::data::{Side, WardKind, WardPlacement};

/// Approximate normalized lane centers from the Radiant perspective.
/// Lane 0 = bottom, 1 = mid, 2 = top. The Dire table is the same set of
/// points with bottom and top swapped: the two safelanes mirror each other
/// across the map diagonal, so no geometric reflection is needed.
const LANE_CENTERS_RADIANT: [(f64, f64); 3] = [(0.22, 0.22), (0.50, 0.50), (0.78, 0.78)];
const LANE_CENTERS_DIRE: [(f64, f64); 3] = [(0.78, 0.78), (0.50, 0.50), (0.22, 0.22)];

const MID_LANE: usize = 1;

/// Wards and approximate positions for one player slot.
#[derive(Debug, Clone)]
pub struct PlayerMapData {
    pub player_slot: i64,
    pub side: Side,
    pub wards: Vec<WardPlacement>,
    /// Game-unit positions approximated from lane assignments.
    pub positions: Vec<(f64, f64)>,
}

fn lane_to_game_xy(lane: i64, side: Side) -> (f64, f64) {
    let centers = match side {
        Side::Radiant => &LANE_CENTERS_RADIANT,
        Side::Dire => &LANE_CENTERS_DIRE,
    };
    let (nx, ny) = if (0..centers.len() as i64).contains(&lane) {
        centers[lane as usize]
    } else {
        centers[MID_LANE]
    };
    (nx * MAP_SIZE_X, ny * MAP_SIZE_Y)
}

fn lane_index(value: &Value) -> Option<i64> {
    adapt::number_like(value).map(|v| v as i64)
}

fn lane_positions(player: &PlayerDto, side: Side) -> Vec<(f64, f64)> {
    let mut positions = Vec::new();
    match &player.lane_pos {
        // time -> lane index
        Some(Value::Object(map)) => {
            for value in map.values() {
                if let Some(lane) = lane_index(value) {
                    positions.push(lane_to_game_xy(lane, side));
                }
            }
        }
        // plain list of lane indices
        Some(Value::Array(items)) => {
            for item in items {
                if let Some(lane) = lane_index(item) {
                    positions.push(lane_to_game_xy(lane, side));
                }
            }
        }
        _ => {}
    }
    positions
}

/// Derive each player's ward placements and approximate positions.
///
/// Ward events missing coordinates and unparsable lane entries are skipped
/// individually; one bad entry never aborts the rest of the player.
pub fn extract_player_data(match_data: &MatchDto) -> Vec<PlayerMapData> {
    let match_id = match_data.match_id;
    let mut result = Vec::new();

    for player in match_data.players.as_deref().unwrap_or(&[]) {
        let player_slot = player.player_slot.unwrap_or(0);
        let side = Side::from_player_slot(player_slot);

        let mut wards = Vec::new();
        for raw in player.obs_log.as_deref().unwrap_or(&[]) {
            if let Some(w) = adapt::ward_from_log_entry(raw, WardKind::Observer, side, match_id) {
                wards.push(w);
            }
        }
        for raw in player.sen_log.as_deref().unwrap_or(&[]) {
            if let Some(w) = adapt::ward_from_log_entry(raw, WardKind::Sentry, side, match_id) {
                wards.push(w);
            }
        }

        let positions = lane_positions(player, side);

        result.push(PlayerMapData {
            player_slot,
            side,
            wards,
            positions,
        });
    }

    result
}
