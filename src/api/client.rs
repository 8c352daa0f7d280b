use crate::config::Config;
use crate::error::AppError;
use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

use super::models::*;

/// OpenDota API wrapper with a fixed minimum delay between requests.
pub struct OpenDotaClient {
    config: Config,
    last_request: Cell<Option<Instant>>,
}

impl OpenDotaClient {
    pub fn new(config: Config) -> Self {
        OpenDotaClient {
            config,
            last_request: Cell::new(None),
        }
    }

    /// Blocks until at least the configured delay has elapsed since the
    /// previous request started, then issues the GET.
    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let delay = Duration::from_millis(self.config.rate_limit_delay_ms);
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < delay {
                thread::sleep(delay - elapsed);
            }
        }
        self.last_request.set(Some(Instant::now()));

        let mut request = ureq::get(url)
            .timeout(Duration::from_secs(30))
            .set("User-Agent", "dota_scope/0.1.0");
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.set("Authorization", &format!("Bearer {key}"));
        }

        request
            .call()
            .map_err(|e| AppError::HttpError(e.to_string()))?
            .into_string()
            .map_err(|e| AppError::HttpError(e.to_string()))
    }

    pub fn get_pro_matches(
        &self,
        limit: usize,
        league_id: Option<i64>,
    ) -> Result<Vec<ProMatchDto>, AppError> {
        let mut url = format!("{}/proMatches", self.config.base_url);
        let mut params = Vec::new();
        if limit > 0 {
            params.push(format!("limit={limit}"));
        }
        if let Some(id) = league_id.filter(|id| *id != 0) {
            params.push(format!("league_id={id}"));
        }
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    pub fn get_match(&self, match_id: i64) -> Result<MatchDto, AppError> {
        let url = format!("{}/matches/{}", self.config.base_url, match_id);

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    pub fn get_teams(&self) -> Result<Vec<TeamDto>, AppError> {
        let url = format!("{}/teams", self.config.base_url);

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    pub fn get_team_matches(
        &self,
        team_id: i64,
        limit: usize,
    ) -> Result<Vec<TeamMatchDto>, AppError> {
        let url = format!(
            "{}/teams/{}/matches?limit={}",
            self.config.base_url, team_id, limit
        );

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    pub fn get_player_matches(
        &self,
        account_id: i64,
        limit: usize,
    ) -> Result<Vec<PlayerMatchDto>, AppError> {
        let url = format!(
            "{}/players/{}/matches?limit={}",
            self.config.base_url, account_id, limit
        );

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }
}
