//! Minimap background loading, with a cached download fallback.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use image::imageops::FilterType;
use image::RgbImage;

use crate::error::AppError;

// Community minimap render; any square map PNG dropped into assets/ works too.
const MAP_URL: &str =
    "https://raw.githubusercontent.com/KaiSforza/dotaMinimapCovers/master/dota700_minimap_1080_large.png";

const LOCAL_NAMES: [&str; 4] = ["dota_minimap.png", "dota_map.png", "minimap.png", "map.png"];

fn cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dota_scope")
}

/// First minimap image found: conventional names under `./assets`, then the
/// download cache.
pub fn get_map_path() -> Option<PathBuf> {
    for name in LOCAL_NAMES {
        let p = PathBuf::from("assets").join(name);
        if p.is_file() {
            return Some(p);
        }
    }
    let cached = cache_dir().join("dota_minimap.png");
    cached.is_file().then_some(cached)
}

/// Download the minimap into the cache dir unless a copy is already there.
pub fn ensure_map_downloaded(force: bool) -> Result<PathBuf, AppError> {
    let dest = cache_dir().join("dota_minimap.png");
    if dest.is_file() && !force {
        return Ok(dest);
    }
    fs::create_dir_all(cache_dir())?;

    let response = ureq::get(MAP_URL)
        .timeout(Duration::from_secs(60))
        .call()
        .map_err(|e| AppError::MapUnavailable(e.to_string()))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| AppError::MapUnavailable(e.to_string()))?;
    fs::write(&dest, &bytes)?;
    Ok(dest)
}

/// Load the minimap resized to `size` x `size`. Returns `None` when no map
/// image can be found or downloaded; callers fall back to a flat background.
pub fn load_map(size: u32) -> Option<RgbImage> {
    let path = get_map_path().or_else(|| ensure_map_downloaded(false).ok())?;
    let img = image::open(path).ok()?;
    Some(image::imageops::resize(
        &img.to_rgb8(),
        size,
        size,
        FilterType::Lanczos3,
    ))
}
