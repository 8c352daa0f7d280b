mod adapt;
mod analysis;
mod api;
mod config;
mod coords;
mod data;
mod display;
mod error;
mod render;
mod replay;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;

use analysis::draft::{aggregate_draft, parse_draft};
use analysis::match_maps::extract_player_data;
use analysis::wards::aggregate_wards;
use api::client::OpenDotaClient;
use api::models::MatchDto;
use config::Config;
use data::Side;
use display::output::{
    display_draft_summary, display_error, display_info, display_success, display_teams,
};
use error::AppError;
use replay::ReplayStore;

#[derive(Parser, Debug)]
#[command(name = "Dota Scope")]
#[command(about = "Dota 2 pro match analysis: draft stats, ward maps, heatmaps", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch pro matches and produce pick/ban/win statistics
    Draft {
        /// Analyze a single match by id
        #[arg(long)]
        match_id: Option<i64>,

        /// Analyze a team's recent matches
        #[arg(long)]
        team_id: Option<i64>,

        /// Analyze a player's recent matches (account id)
        #[arg(long)]
        player: Option<i64>,

        /// Number of matches to fetch (default: 100)
        #[arg(short, long, default_value = "100")]
        limit: usize,

        /// Restrict the pro match list to one league
        #[arg(long)]
        league_id: Option<i64>,

        /// Output JSON path (default: <output dir>/draft_stats.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows to print in the summary table (default: 10)
        #[arg(short, long, default_value = "10")]
        top_n: usize,
    },

    /// Render a ward map from ward JSON dumps
    Wards {
        /// Directory of ward dump files (default: replay dir from config)
        #[arg(long)]
        replay_dir: Option<PathBuf>,

        /// A single ward dump file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output image path (default: <output dir>/ward_map.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render positional heatmaps from a positions JSON file
    Heatmap {
        /// Positions file: [[x, y], ...] or {"slot": [[x, y], ...], ...}
        #[arg(long)]
        file: PathBuf,

        /// Output image path (single list) or directory (per slot)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat coordinates as already normalized to [0,1]
        #[arg(long)]
        normalized: bool,
    },

    /// Render ward map + heatmap for every player of one match
    MatchMaps {
        #[arg(long)]
        match_id: i64,
    },

    /// Download the minimap background image into the local cache
    DownloadMap {
        /// Re-download even if a cached copy exists
        #[arg(long)]
        force: bool,
    },

    /// List teams and their ids
    ListTeams {
        /// Filter by name substring
        #[arg(long)]
        search: Option<String>,
    },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = Config::from_env()?;

    match args.command {
        Command::Draft {
            match_id,
            team_id,
            player,
            limit,
            league_id,
            output,
            top_n,
        } => cmd_draft(
            &config, match_id, team_id, player, limit, league_id, output, top_n,
        ),
        Command::Wards {
            replay_dir,
            file,
            output,
        } => cmd_wards(&config, replay_dir, file, output),
        Command::Heatmap {
            file,
            output,
            normalized,
        } => cmd_heatmap(&config, file, output, normalized),
        Command::MatchMaps { match_id } => cmd_match_maps(&config, match_id),
        Command::DownloadMap { force } => cmd_download_map(force),
        Command::ListTeams { search } => cmd_list_teams(&config, search),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_draft(
    config: &Config,
    match_id: Option<i64>,
    team_id: Option<i64>,
    player: Option<i64>,
    limit: usize,
    league_id: Option<i64>,
    output: Option<PathBuf>,
    top_n: usize,
) -> Result<(), AppError> {
    let client = OpenDotaClient::new(config.clone());

    let match_ids: Vec<i64> = if let Some(id) = match_id {
        display_info(&format!("Analyzing single match {id}"));
        vec![id]
    } else if let Some(id) = team_id {
        display_info(&format!("Fetching matches for team {id}..."));
        client
            .get_team_matches(id, limit)?
            .into_iter()
            .map(|m| m.match_id)
            .collect()
    } else if let Some(id) = player {
        display_info(&format!("Fetching matches for player {id}..."));
        client
            .get_player_matches(id, limit)?
            .into_iter()
            .map(|m| m.match_id)
            .collect()
    } else {
        display_info("Fetching recent pro matches...");
        let pro = client.get_pro_matches(limit, league_id)?;
        // the list comes newest first
        if let (Some(newest), Some(oldest)) = (pro.first(), pro.last()) {
            if let (Some(from), Some(to)) = (oldest.start_time, newest.start_time) {
                display_info(&format!(
                    "Match span: {} to {}",
                    format_day(from),
                    format_day(to)
                ));
            }
        }
        pro.into_iter().map(|m| m.match_id).collect()
    };

    if match_ids.is_empty() {
        return Err(AppError::NoMatches);
    }
    display_success(&format!("Found {} matches", match_ids.len()));

    let matches = fetch_matches(&client, &match_ids);

    let drafts: Vec<_> = matches
        .iter()
        .filter_map(parse_draft)
        .filter(|d| !d.picks.is_empty() || !d.bans.is_empty())
        .collect();
    if drafts.is_empty() {
        return Err(AppError::NoDraftData);
    }

    if let [draft] = drafts.as_slice() {
        let winner = if draft.radiant_win { "radiant" } else { "dire" };
        display_info(&format!(
            "Match {}: {} picks / {} bans, {} victory",
            draft.match_id,
            draft.picks.len(),
            draft.bans.len(),
            winner
        ));
        if let (Some(r), Some(d)) = (draft.radiant_team_id, draft.dire_team_id) {
            display_info(&format!("Teams: {r} (radiant) vs {d} (dire)"));
        }
    }

    let stats = aggregate_draft(&drafts);

    let out_path = match output {
        Some(p) => p,
        None => config.ensure_output_dir()?.join("draft_stats.json"),
    };
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(&stats).map_err(|e| AppError::JsonError(e.to_string()))?;
    fs::write(&out_path, json)?;

    display_draft_summary(&stats, top_n);
    display_success(&format!("Draft stats written to {}", out_path.display()));
    Ok(())
}

fn format_day(epoch_sec: i64) -> String {
    Utc.timestamp_opt(epoch_sec, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Sequential batch fetch; a match that fails to fetch is dropped from the
/// result set and the batch carries on.
fn fetch_matches(client: &OpenDotaClient, match_ids: &[i64]) -> Vec<MatchDto> {
    let pb = ProgressBar::new(match_ids.len() as u64);
    pb.set_message("Fetching match details");
    let mut matches = Vec::new();
    for &id in match_ids {
        if let Ok(m) = client.get_match(id) {
            matches.push(m);
        }
        pb.inc(1);
    }
    pb.finish_with_message("✓ Match data fetched");
    matches
}

fn cmd_wards(
    config: &Config,
    replay_dir: Option<PathBuf>,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), AppError> {
    let store = ReplayStore::new(replay_dir.unwrap_or_else(|| config.replay_dir.clone()));
    let wards = match file {
        Some(path) => store.load_wards_from_file(&path)?,
        None => store.load_all_wards(),
    };
    if wards.is_empty() {
        return Err(AppError::NoWardData);
    }

    let matches_seen: std::collections::BTreeSet<i64> =
        wards.iter().filter_map(|w| w.match_id).collect();
    if !matches_seen.is_empty() {
        let last_time = wards.iter().map(|w| w.game_time_sec).fold(0.0, f64::max);
        display_info(&format!(
            "Wards from {} matches, latest placed at {:.0} s",
            matches_seen.len(),
            last_time
        ));
    }

    let buckets = aggregate_wards(&wards);
    let out_path = match output {
        Some(p) => p,
        None => config.ensure_output_dir()?.join("ward_map.png"),
    };
    render::ward_map::draw_ward_map(&buckets, &out_path)?;
    display_success(&format!(
        "Ward map written to {} ({} wards)",
        out_path.display(),
        buckets.total_count
    ));
    Ok(())
}

fn cmd_heatmap(
    config: &Config,
    file: PathBuf,
    output: Option<PathBuf>,
    normalized: bool,
) -> Result<(), AppError> {
    let content = fs::read_to_string(&file)?;
    let data: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| AppError::JsonError(format!("{}: {}", file.display(), e)))?;

    let mut positions_by_slot: BTreeMap<i64, Vec<(f64, f64)>> = BTreeMap::new();
    match &data {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                let slot = match key.parse::<i64>() {
                    Ok(s) => s,
                    Err(_) => continue,
                };
                if let Some(points) = value.as_array() {
                    positions_by_slot.insert(slot, parse_position_list(points));
                }
            }
        }
        serde_json::Value::Array(points) => {
            positions_by_slot.insert(0, parse_position_list(points));
        }
        _ => {}
    }
    positions_by_slot.retain(|_, v| !v.is_empty());
    if positions_by_slot.is_empty() {
        return Err(AppError::NoPositionData);
    }

    let draw: fn(&[(f64, f64)], &std::path::Path) -> Result<(), AppError> = if normalized {
        render::heatmap::draw_heatmap_normalized
    } else {
        render::heatmap::draw_heatmap
    };

    if positions_by_slot.len() == 1 && positions_by_slot.contains_key(&0) {
        let out_path = match output {
            Some(p) => p,
            None => config.ensure_output_dir()?.join("heatmap.png"),
        };
        draw(&positions_by_slot[&0], &out_path)?;
        display_success(&format!("Heatmap written to {}", out_path.display()));
    } else {
        let out_dir = match output {
            Some(p) => p,
            None => config.ensure_output_dir()?,
        };
        fs::create_dir_all(&out_dir)?;
        for (slot, positions) in &positions_by_slot {
            draw(positions, &out_dir.join(format!("heatmap_{slot}.png")))?;
        }
        display_success(&format!(
            "{} heatmaps written to {}",
            positions_by_slot.len(),
            out_dir.display()
        ));
    }
    Ok(())
}

fn parse_position_list(points: &[serde_json::Value]) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter_map(|p| {
            let pair = p.as_array()?;
            let x = adapt::number_like(pair.first()?)?;
            let y = adapt::number_like(pair.get(1)?)?;
            Some((x, y))
        })
        .collect()
}

fn cmd_match_maps(config: &Config, match_id: i64) -> Result<(), AppError> {
    let client = OpenDotaClient::new(config.clone());
    display_info(&format!("Fetching match {match_id}..."));
    let match_data = client.get_match(match_id)?;

    let players = extract_player_data(&match_data);
    if players.is_empty() {
        return Err(AppError::NoPlayerData);
    }
    if players.len() != 10 {
        display_info(&format!(
            "Only {} players parsed; generating maps for those",
            players.len()
        ));
    }

    let out_dir = config.ensure_output_dir()?.join(match_id.to_string());
    fs::create_dir_all(&out_dir)?;

    let mut saved = 0usize;
    for player in &players {
        let index = match player.side {
            Side::Radiant => player.player_slot + 1,
            Side::Dire => player.player_slot - 128 + 1,
        };
        let label = format!("{}_{}", player.side.label(), index);

        let buckets = aggregate_wards(&player.wards);
        render::ward_map::draw_ward_map(&buckets, &out_dir.join(format!("{label}_wards.png")))?;
        render::heatmap::draw_heatmap(
            &player.positions,
            &out_dir.join(format!("{label}_heatmap.png")),
        )?;
        saved += 2;
    }

    display_success(&format!("Saved {} images to {}", saved, out_dir.display()));
    Ok(())
}

fn cmd_download_map(force: bool) -> Result<(), AppError> {
    let path = render::map_loader::ensure_map_downloaded(force)?;
    display_success(&format!("Map saved to {}", path.display()));
    Ok(())
}

fn cmd_list_teams(config: &Config, search: Option<String>) -> Result<(), AppError> {
    let client = OpenDotaClient::new(config.clone());
    let mut teams = client.get_teams()?;

    if let Some(query) = search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|q| !q.is_empty())
    {
        teams.retain(|t| {
            t.name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&query))
        });
    }

    if teams.is_empty() {
        display_info("No teams matched");
        return Ok(());
    }

    teams.truncate(100);
    display_teams(&teams);
    Ok(())
}
