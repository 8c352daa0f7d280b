//! Ward bucketing by kind and side in normalized space.

use crate::coords::game_to_normalized;
use crate::data::{Side, WardKind, WardPlacement};

/// Normalized ward points bucketed by kind and side.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WardBuckets {
    pub observer_radiant: Vec<(f64, f64)>,
    pub observer_dire: Vec<(f64, f64)>,
    pub sentry_radiant: Vec<(f64, f64)>,
    pub sentry_dire: Vec<(f64, f64)>,
    pub total_count: usize,
}

/// Normalize every ward and group it by kind and side. The game-unit
/// coordinates do not survive past this point.
pub fn aggregate_wards(wards: &[WardPlacement]) -> WardBuckets {
    let mut buckets = WardBuckets::default();
    for w in wards {
        let pt = game_to_normalized(w.x, w.y);
        match (w.kind, w.side) {
            (WardKind::Observer, Side::Radiant) => buckets.observer_radiant.push(pt),
            (WardKind::Observer, Side::Dire) => buckets.observer_dire.push(pt),
            (WardKind::Sentry, Side::Radiant) => buckets.sentry_radiant.push(pt),
            (WardKind::Sentry, Side::Dire) => buckets.sentry_dire.push(pt),
        }
    }
    buckets.total_count = wards.len();
    buckets
}
