//! Ward dump loading.
//!
//! Real `.dem` replay parsing is out of scope; ward data arrives as JSON
//! dumps produced by external replay tooling and is adapted through
//! `crate::adapt`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::adapt;
use crate::data::WardPlacement;
use crate::error::AppError;

/// Parse ward records from a decoded JSON document. Accepts either a bare
/// array of ward records or an object carrying them under `wards`,
/// `object_wards` or `ward_log`.
pub fn parse_wards_from_json(data: &Value, match_id: Option<i64>) -> Vec<WardPlacement> {
    let empty = Vec::new();
    let raw: &Vec<Value> = match data {
        Value::Object(obj) => ["wards", "object_wards", "ward_log"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_array))
            .unwrap_or(&empty),
        Value::Array(items) => items,
        _ => &empty,
    };

    raw.iter()
        .filter_map(|entry| adapt::ward_from_dump_record(entry, match_id))
        .collect()
}

pub struct ReplayStore {
    replay_dir: PathBuf,
}

impl ReplayStore {
    pub fn new(replay_dir: impl Into<PathBuf>) -> Self {
        ReplayStore {
            replay_dir: replay_dir.into(),
        }
    }

    pub fn load_wards_from_file(&self, path: &Path) -> Result<Vec<WardPlacement>, AppError> {
        let content = fs::read_to_string(path)?;
        let data: Value = serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("{}: {}", path.display(), e)))?;
        let match_id = data.get("match_id").and_then(Value::as_i64);
        Ok(parse_wards_from_json(&data, match_id))
    }

    /// Load wards from every `.json` file under the replay directory.
    /// Unreadable or malformed files are skipped.
    pub fn load_all_wards(&self) -> Vec<WardPlacement> {
        let mut wards = Vec::new();
        for path in json_files(&self.replay_dir) {
            if let Ok(parsed) = self.load_wards_from_file(&path) {
                wards.extend(parsed);
            }
        }
        wards
    }
}

fn json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return files,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            files.extend(json_files(&path));
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Side, WardKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn accepts_a_bare_array() {
        let data = json!([
            {"x": 1200, "y": 3400, "ward_type": "observer", "team": "radiant", "game_time": 600},
            {"x": 5000, "y": 6000, "ward_type": "sentry", "team": "dire"},
        ]);

        let wards = parse_wards_from_json(&data, Some(3));
        assert_eq!(wards.len(), 2);
        assert_eq!(wards[0].kind, WardKind::Observer);
        assert_eq!(wards[0].game_time_sec, 600.0);
        assert_eq!(wards[1].kind, WardKind::Sentry);
        assert_eq!(wards[1].side, Side::Dire);
        assert!(wards.iter().all(|w| w.match_id == Some(3)));
    }

    #[test]
    fn accepts_wrapped_objects() {
        for key in ["wards", "object_wards", "ward_log"] {
            let data = json!({key: [{"x": 1.0, "y": 2.0}]});
            assert_eq!(parse_wards_from_json(&data, None).len(), 1, "key {key}");
        }
    }

    #[test]
    fn unknown_shapes_yield_nothing() {
        assert!(parse_wards_from_json(&json!({"other": []}), None).is_empty());
        assert!(parse_wards_from_json(&json!("wards"), None).is_empty());
    }

    #[test]
    fn non_object_entries_are_dropped() {
        let data = json!([{"x": 1.0, "y": 2.0}, 42, "ward", null]);
        assert_eq!(parse_wards_from_json(&data, None).len(), 1);
    }
}
