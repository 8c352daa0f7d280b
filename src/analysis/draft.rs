//! Draft parsing and per-hero pick/ban/win aggregation.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::api::models::MatchDto;
use crate::data::{DraftEntry, DraftInfo, Side};

/// Minimum picks for a hero to enter the win-rate ranking; keeps one lucky
/// game from topping the list.
const WIN_RATE_MIN_PICKS: u64 = 5;
const RANKING_LEN: usize = 30;

/// Per-hero aggregate over a match corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroStats {
    pub hero_id: i64,
    pub pick_count: u64,
    pub pick_rate: f64,
    pub ban_count: u64,
    pub ban_rate: f64,
    pub wins: u64,
    pub win_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct DraftSummary {
    pub pick_rate_ranking: Vec<HeroStats>,
    pub ban_rate_ranking: Vec<HeroStats>,
    pub win_rate_ranking: Vec<HeroStats>,
}

#[derive(Debug, Serialize)]
pub struct DraftStats {
    pub total_matches: u64,
    pub heroes: BTreeMap<i64, HeroStats>,
    pub summary: DraftSummary,
}

/// Parse one match record into a `DraftInfo`.
///
/// Returns `None` when the record carries no match id. Events without a hero
/// id are dropped; a missing `order` falls back to the running count of
/// entries collected so far.
pub fn parse_draft(match_data: &MatchDto) -> Option<DraftInfo> {
    let match_id = match_data.match_id?;
    let radiant_win = match_data.radiant_win.unwrap_or(false);

    let mut picks = Vec::new();
    let mut bans = Vec::new();
    for pb in match_data.picks_bans.as_deref().unwrap_or(&[]) {
        let hero_id = match pb.hero_id {
            Some(id) => id,
            None => continue,
        };
        let side = Side::from_team_index(pb.team.unwrap_or(0));
        let order = pb.order.unwrap_or((picks.len() + bans.len()) as i64);
        let entry = DraftEntry {
            hero_id,
            side,
            order,
        };
        if pb.is_pick.unwrap_or(false) {
            picks.push(entry);
        } else {
            bans.push(entry);
        }
    }

    Some(DraftInfo {
        match_id,
        radiant_win,
        picks,
        bans,
        radiant_team_id: match_data.radiant_team_id,
        dire_team_id: match_data.dire_team_id,
    })
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Aggregate pick/ban/win statistics across a corpus of drafts.
///
/// Pick and ban rates are over the number of contributing matches; the win
/// rate is over the hero's own pick count. Rankings are top-30, with the
/// win-rate ranking restricted to heroes picked at least
/// `WIN_RATE_MIN_PICKS` times.
pub fn aggregate_draft(drafts: &[DraftInfo]) -> DraftStats {
    let mut pick_count: BTreeMap<i64, u64> = BTreeMap::new();
    let mut ban_count: BTreeMap<i64, u64> = BTreeMap::new();
    let mut pick_wins: BTreeMap<i64, u64> = BTreeMap::new();
    let total_matches = drafts.len() as u64;

    for draft in drafts {
        for pick in &draft.picks {
            *pick_count.entry(pick.hero_id).or_default() += 1;
            let won = match pick.side {
                Side::Radiant => draft.radiant_win,
                Side::Dire => !draft.radiant_win,
            };
            if won {
                *pick_wins.entry(pick.hero_id).or_default() += 1;
            }
        }
        for ban in &draft.bans {
            *ban_count.entry(ban.hero_id).or_default() += 1;
        }
    }

    // Union of picked and banned heroes, in ascending id order. That order
    // also serves as the tie-break for the stable ranking sorts below.
    let hero_ids: BTreeSet<i64> = pick_count.keys().chain(ban_count.keys()).copied().collect();

    let mut heroes = BTreeMap::new();
    for hero_id in hero_ids {
        let picks = pick_count.get(&hero_id).copied().unwrap_or(0);
        let bans = ban_count.get(&hero_id).copied().unwrap_or(0);
        let wins = pick_wins.get(&hero_id).copied().unwrap_or(0);
        heroes.insert(
            hero_id,
            HeroStats {
                hero_id,
                pick_count: picks,
                pick_rate: if total_matches > 0 {
                    round4(picks as f64 / total_matches as f64)
                } else {
                    0.0
                },
                ban_count: bans,
                ban_rate: if total_matches > 0 {
                    round4(bans as f64 / total_matches as f64)
                } else {
                    0.0
                },
                wins,
                win_rate: if picks > 0 {
                    round4(wins as f64 / picks as f64)
                } else {
                    0.0
                },
            },
        );
    }

    let ranked = |key: fn(&HeroStats) -> f64, filter: fn(&HeroStats) -> bool| -> Vec<HeroStats> {
        let mut entries: Vec<HeroStats> = heroes.values().filter(|h| filter(h)).cloned().collect();
        entries.sort_by(|a, b| {
            key(b)
                .partial_cmp(&key(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries.truncate(RANKING_LEN);
        entries
    };

    let summary = DraftSummary {
        pick_rate_ranking: ranked(|h| h.pick_rate, |_| true),
        ban_rate_ranking: ranked(|h| h.ban_rate, |_| true),
        win_rate_ranking: ranked(|h| h.win_rate, |h| h.pick_count >= WIN_RATE_MIN_PICKS),
    };

    DraftStats {
        total_matches,
        heroes,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn match_from(value: serde_json::Value) -> MatchDto {
        serde_json::from_value(value).unwrap()
    }

    fn draft(match_id: i64, radiant_win: bool, picks: &[(i64, Side)]) -> DraftInfo {
        DraftInfo {
            match_id,
            radiant_win,
            picks: picks
                .iter()
                .enumerate()
                .map(|(order, &(hero_id, side))| DraftEntry {
                    hero_id,
                    side,
                    order: order as i64,
                })
                .collect(),
            bans: Vec::new(),
            radiant_team_id: None,
            dire_team_id: None,
        }
    }

    #[test]
    fn record_without_match_id_yields_nothing() {
        let m = match_from(json!({"radiant_win": true, "picks_bans": []}));
        assert!(parse_draft(&m).is_none());
    }

    #[test]
    fn splits_picks_and_bans() {
        let m = match_from(json!({
            "match_id": 5,
            "radiant_win": true,
            "picks_bans": [
                {"hero_id": 1, "is_pick": true, "team": 0, "order": 0},
                {"hero_id": 2, "is_pick": false, "team": 1, "order": 1},
            ],
        }));

        let d = parse_draft(&m).unwrap();
        assert_eq!(d.match_id, 5);
        assert!(d.radiant_win);
        assert_eq!(
            d.picks,
            vec![DraftEntry {
                hero_id: 1,
                side: Side::Radiant,
                order: 0
            }]
        );
        assert_eq!(
            d.bans,
            vec![DraftEntry {
                hero_id: 2,
                side: Side::Dire,
                order: 1
            }]
        );
    }

    #[test]
    fn drops_events_without_hero_and_backfills_order() {
        let m = match_from(json!({
            "match_id": 9,
            "picks_bans": [
                {"hero_id": 1, "is_pick": true, "team": 0},
                {"is_pick": true, "team": 0},
                {"hero_id": 2, "is_pick": false, "team": 1},
            ],
        }));

        let d = parse_draft(&m).unwrap();
        // the hero-less event does not advance the running count
        assert_eq!(d.picks[0].order, 0);
        assert_eq!(d.bans[0].order, 1);
        // radiant_win absent defaults to a dire win
        assert!(!d.radiant_win);
    }

    #[test]
    fn win_accounting_matches_pick_side_to_outcome() {
        let drafts = vec![
            draft(1, true, &[(1, Side::Radiant)]),
            draft(2, false, &[(1, Side::Radiant)]),
        ];

        let stats = aggregate_draft(&drafts);
        let hero = &stats.heroes[&1];
        assert_eq!(hero.pick_count, 2);
        assert_eq!(hero.wins, 1);
        assert_eq!(hero.win_rate, 0.5);
    }

    #[test]
    fn dire_wins_are_the_complement_of_the_flag() {
        let drafts = vec![draft(1, false, &[(3, Side::Dire)])];

        let stats = aggregate_draft(&drafts);
        assert_eq!(stats.heroes[&3].wins, 1);
        assert_eq!(stats.heroes[&3].win_rate, 1.0);
    }

    #[test]
    fn rates_are_over_total_matches() {
        let drafts = vec![
            draft(1, true, &[(1, Side::Radiant)]),
            draft(2, true, &[]),
        ];

        let stats = aggregate_draft(&drafts);
        assert_eq!(stats.total_matches, 2);
        assert_eq!(stats.heroes[&1].pick_rate, 0.5);
    }

    #[test]
    fn bans_count_without_touching_wins() {
        let mut d = draft(1, true, &[]);
        d.bans.push(DraftEntry {
            hero_id: 7,
            side: Side::Radiant,
            order: 0,
        });

        let stats = aggregate_draft(&[d]);
        let hero = &stats.heroes[&7];
        assert_eq!(hero.ban_count, 1);
        assert_eq!(hero.ban_rate, 1.0);
        assert_eq!(hero.pick_count, 0);
        assert_eq!(hero.wins, 0);
        assert_eq!(hero.win_rate, 0.0);
    }

    #[test]
    fn win_rate_ranking_requires_five_picks() {
        // hero 10: 4 picks, all wins; hero 20: 5 picks, 4 wins
        let mut drafts = Vec::new();
        for id in 1..=4 {
            drafts.push(draft(id, true, &[(10, Side::Radiant), (20, Side::Radiant)]));
        }
        drafts.push(draft(5, false, &[(20, Side::Radiant)]));

        let stats = aggregate_draft(&drafts);
        assert_eq!(stats.heroes[&10].win_rate, 1.0);

        let ranked: Vec<i64> = stats
            .summary
            .win_rate_ranking
            .iter()
            .map(|h| h.hero_id)
            .collect();
        assert_eq!(ranked, vec![20]);
    }

    #[test]
    fn empty_corpus_aggregates_to_nothing() {
        let stats = aggregate_draft(&[]);
        assert_eq!(stats.total_matches, 0);
        assert!(stats.heroes.is_empty());
        assert!(stats.summary.pick_rate_ranking.is_empty());
        assert!(stats.summary.ban_rate_ranking.is_empty());
        assert!(stats.summary.win_rate_ranking.is_empty());
    }

    #[test]
    fn rankings_break_ties_by_ascending_hero_id() {
        let drafts = vec![draft(
            1,
            true,
            &[(30, Side::Radiant), (4, Side::Radiant), (12, Side::Dire)],
        )];

        let stats = aggregate_draft(&drafts);
        let ranked: Vec<i64> = stats
            .summary
            .pick_rate_ranking
            .iter()
            .map(|h| h.hero_id)
            .collect();
        assert_eq!(ranked, vec![4, 12, 30]);
    }

    #[test]
    fn serializes_to_the_published_shape() {
        let stats = aggregate_draft(&[draft(1, true, &[(1, Side::Radiant)])]);
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["total_matches"], 1);
        let hero = &value["heroes"]["1"];
        assert_eq!(hero["hero_id"], 1);
        assert_eq!(hero["pick_count"], 1);
        assert_eq!(hero["pick_rate"], 1.0);
        assert_eq!(hero["ban_count"], 0);
        assert_eq!(hero["wins"], 1);
        assert_eq!(hero["win_rate"], 1.0);
        assert!(value["summary"]["pick_rate_ranking"].is_array());
        assert!(value["summary"]["ban_rate_ranking"].is_array());
        assert!(value["summary"]["win_rate_ranking"].is_array());
    }
}
