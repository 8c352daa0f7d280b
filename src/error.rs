use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("No matches returned by the API")]
    NoMatches,

    #[error("No draft data in the fetched matches")]
    NoDraftData,

    #[error("No ward data found")]
    NoWardData,

    #[error("No position data found")]
    NoPositionData,

    #[error("Match has no player data")]
    NoPlayerData,

    #[error("Map image unavailable: {0}")]
    MapUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
