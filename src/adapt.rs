//! Adapters for the loosely-typed JSON shapes that ward logs and ward dump
//! files arrive in. Each adapter documents its field-name candidates; the
//! first non-null candidate wins.

use serde_json::{Map, Value};

use crate::coords::to_world_coords;
use crate::data::{Side, WardKind, WardPlacement};

/// Numeric value from a JSON number or a numeric string.
pub fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// First candidate holding a numeric value.
pub fn field_number(obj: &Map<String, Value>, candidates: &[&str]) -> Option<f64> {
    candidates
        .iter()
        .find_map(|key| obj.get(*key).and_then(number_like))
}

/// First candidate holding a string value.
pub fn field_str<'a>(obj: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
}

/// Ward event from a match record's `obs_log` / `sen_log`.
///
/// Coordinates: `x`/`position_x` and `y`/`position_y`, required, in minimap
/// cell units (converted to game units here). Time: `t`/`time`/`game_time`,
/// optional. Entries missing either coordinate yield `None`.
pub fn ward_from_log_entry(
    entry: &Value,
    kind: WardKind,
    side: Side,
    match_id: Option<i64>,
) -> Option<WardPlacement> {
    let obj = entry.as_object()?;
    let x = field_number(obj, &["x", "position_x"])?;
    let y = field_number(obj, &["y", "position_y"])?;
    let (x, y) = to_world_coords(x, y);
    let game_time_sec = field_number(obj, &["t", "time", "game_time"]).unwrap_or(0.0);
    Some(WardPlacement {
        x,
        y,
        kind,
        side,
        game_time_sec,
        match_id,
    })
}

/// Ward record from a standalone ward dump file, already in game units.
///
/// Coordinates: `x`/`position_x` and `y`/`position_y`, defaulting to the map
/// origin. Kind: `ward_type`/`type`, anything containing "sentry" is a
/// sentry, otherwise observer. Side: `team`, anything containing "dire" is
/// Dire, otherwise Radiant. Time: `game_time`/`game_time_sec`/`t`.
pub fn ward_from_dump_record(entry: &Value, match_id: Option<i64>) -> Option<WardPlacement> {
    let obj = entry.as_object()?;
    let x = field_number(obj, &["x", "position_x"]).unwrap_or(0.0);
    let y = field_number(obj, &["y", "position_y"]).unwrap_or(0.0);
    let kind = match field_str(obj, &["ward_type", "type"]) {
        Some(s) if s.to_ascii_lowercase().contains("sentry") => WardKind::Sentry,
        _ => WardKind::Observer,
    };
    let side = match field_str(obj, &["team"]) {
        Some(s) if s.to_ascii_lowercase().contains("dire") => Side::Dire,
        _ => Side::Radiant,
    };
    let game_time_sec = field_number(obj, &["game_time", "game_time_sec", "t"]).unwrap_or(0.0);
    Some(WardPlacement {
        x,
        y,
        kind,
        side,
        game_time_sec,
        match_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::game_to_normalized;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn string_and_numeric_coordinates_are_equivalent() {
        let from_strings = ward_from_dump_record(
            &json!({"x": "1200", "y": "3400", "ward_type": "observer", "team": "radiant"}),
            None,
        )
        .unwrap();
        let from_numbers = ward_from_dump_record(
            &json!({"x": 1200, "y": 3400, "ward_type": "observer", "team": "radiant"}),
            None,
        )
        .unwrap();

        assert_eq!(
            game_to_normalized(from_strings.x, from_strings.y),
            game_to_normalized(from_numbers.x, from_numbers.y),
        );
    }

    #[test]
    fn first_non_null_candidate_wins() {
        let entry = json!({"x": 0, "position_x": 5000, "y": 10, "t": 30});
        let obj = entry.as_object().unwrap();

        // `x` is present (even as zero), so `position_x` is never consulted
        assert_eq!(field_number(obj, &["x", "position_x"]), Some(0.0));
        assert_eq!(field_number(obj, &["position_y", "y"]), Some(10.0));
    }

    #[test]
    fn log_entry_without_coordinates_is_skipped() {
        let entry = json!({"t": 120});
        assert!(ward_from_log_entry(&entry, WardKind::Observer, Side::Radiant, None).is_none());

        let entry = json!({"x": 90, "t": 120});
        assert!(ward_from_log_entry(&entry, WardKind::Observer, Side::Radiant, None).is_none());
    }

    #[test]
    fn log_entry_converts_cells_to_game_units() {
        let ward = ward_from_log_entry(
            &json!({"x": 128, "y": 128, "time": 600}),
            WardKind::Sentry,
            Side::Dire,
            Some(7),
        )
        .unwrap();

        assert_eq!(game_to_normalized(ward.x, ward.y), (0.5, 0.5));
        assert_eq!(ward.game_time_sec, 600.0);
        assert_eq!(ward.kind, WardKind::Sentry);
        assert_eq!(ward.side, Side::Dire);
        assert_eq!(ward.match_id, Some(7));
    }

    #[test]
    fn dump_record_infers_kind_and_side() {
        let ward = ward_from_dump_record(
            &json!({"x": 100.0, "y": 200.0, "type": "sentry_ward", "team": "Dire"}),
            None,
        )
        .unwrap();
        assert_eq!(ward.kind, WardKind::Sentry);
        assert_eq!(ward.side, Side::Dire);

        let ward = ward_from_dump_record(&json!({"x": 1.0, "y": 2.0}), None).unwrap();
        assert_eq!(ward.kind, WardKind::Observer);
        assert_eq!(ward.side, Side::Radiant);
    }

    #[test]
    fn non_object_entries_are_skipped() {
        assert!(ward_from_dump_record(&json!([1200, 3400]), None).is_none());
        assert!(ward_from_log_entry(&json!("x"), WardKind::Observer, Side::Radiant, None).is_none());
    }
}
