use colored::*;
use tabled::{settings::Style, Table, Tabled};

use crate::analysis::draft::DraftStats;
use crate::api::models::TeamDto;

#[derive(Tabled)]
struct HeroRow {
    rank: String,
    #[tabled(rename = "hero")]
    hero_id: String,
    picks: String,
    #[tabled(rename = "pick rate")]
    pick_rate: String,
    bans: String,
    #[tabled(rename = "ban rate")]
    ban_rate: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
}

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "team_id")]
    team_id: String,
    name: String,
    tag: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_draft_summary(stats: &DraftStats, top_n: usize) {
    println!(
        "\n{}",
        format!("📊 DRAFT STATS ({} matches)", stats.total_matches)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<HeroRow> = stats
        .summary
        .pick_rate_ranking
        .iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, h)| HeroRow {
            rank: format!("#{}", idx + 1),
            hero_id: h.hero_id.to_string(),
            picks: h.pick_count.to_string(),
            pick_rate: format!("{:.1}%", h.pick_rate * 100.0),
            bans: h.ban_count.to_string(),
            ban_rate: format!("{:.1}%", h.ban_rate * 100.0),
            win_rate: format!("{:.1}%", h.win_rate * 100.0),
        })
        .collect();

    if rows.is_empty() {
        println!("{}", "No hero data in the fetched matches".yellow());
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_teams(teams: &[TeamDto]) {
    let rows: Vec<TeamRow> = teams
        .iter()
        .map(|t| TeamRow {
            team_id: t.team_id.map(|id| id.to_string()).unwrap_or_default(),
            name: t.name.clone().unwrap_or_default(),
            tag: t.tag.clone().unwrap_or_default(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
