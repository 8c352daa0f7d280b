//! Shared record types produced by the parsers and consumed by the
//! aggregators and the renderer.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Radiant,
    Dire,
}

impl Side {
    /// Draft events carry a team index: 0 is Radiant, anything else Dire.
    pub fn from_team_index(team: i64) -> Self {
        if team == 0 {
            Side::Radiant
        } else {
            Side::Dire
        }
    }

    /// Player slots below 128 are Radiant, the rest Dire.
    pub fn from_player_slot(slot: i64) -> Self {
        if slot < 128 {
            Side::Radiant
        } else {
            Side::Dire
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Radiant => "radiant",
            Side::Dire => "dire",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WardKind {
    Observer,
    Sentry,
}

/// A single ward event, positioned in game units.
#[derive(Debug, Clone)]
pub struct WardPlacement {
    pub x: f64,
    pub y: f64,
    pub kind: WardKind,
    pub side: Side,
    pub game_time_sec: f64,
    pub match_id: Option<i64>,
}

/// One draft action: a pick or ban of a hero, in draft order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftEntry {
    pub hero_id: i64,
    pub side: Side,
    pub order: i64,
}

/// One match's draft record plus outcome.
#[derive(Debug, Clone)]
pub struct DraftInfo {
    pub match_id: i64,
    pub radiant_win: bool,
    pub picks: Vec<DraftEntry>,
    pub bans: Vec<DraftEntry>,
    pub radiant_team_id: Option<i64>,
    pub dire_team_id: Option<i64>,
}
