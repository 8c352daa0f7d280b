use crate::error::AppError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub rate_limit_delay_ms: u64,
    pub output_dir: PathBuf,
    pub replay_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let mut base_url = env::var("OPENDOTA_BASE_URL")
            .unwrap_or_else(|_| "https://api.opendota.com/api".to_string());
        while base_url.ends_with('/') {
            base_url.pop();
        }

        let api_key = env::var("OPENDOTA_API_KEY").ok().filter(|k| !k.is_empty());

        let rate_limit_delay_ms = match env::var("OPENDOTA_RATE_DELAY_MS") {
            Ok(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!("OPENDOTA_RATE_DELAY_MS is not a number: {raw}"))
            })?,
            Err(_) => 1000,
        };

        let output_dir =
            PathBuf::from(env::var("OUTPUT_DIR").unwrap_or_else(|_| "output".to_string()));
        let replay_dir =
            PathBuf::from(env::var("REPLAY_DIR").unwrap_or_else(|_| "replays".to_string()));

        Ok(Config {
            base_url,
            api_key,
            rate_limit_delay_ms,
            output_dir,
            replay_dir,
        })
    }

    pub fn ensure_output_dir(&self) -> Result<PathBuf, AppError> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(self.output_dir.clone())
    }
}
