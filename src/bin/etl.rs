use std::path::PathBuf;

use anyhow::Result;

use lfc_history::config::{self, Config, arg_value, parse_season_list};
use lfc_history::etl::run_etl;
use lfc_history::feed::FeedSource;
use lfc_history::logging::init_tracing;
use lfc_history::snapshot::write_snapshot;

fn main() -> Result<()> {
    config::load_dotenv();
    init_tracing("info")?;

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut cfg = Config::from_env();
    if let Some(dir) = arg_value(&args, "--data-dir") {
        cfg.data_dir = PathBuf::from(dir);
    }
    if let Some(dir) = arg_value(&args, "--feed-dir") {
        cfg.feed_dir = Some(PathBuf::from(dir));
    }
    if let Some(path) = arg_value(&args, "--standings-overrides") {
        cfg.standings_overrides = Some(PathBuf::from(path));
    }
    if let Some(raw) = arg_value(&args, "--seasons") {
        let seasons = parse_season_list(&raw);
        if !seasons.is_empty() {
            cfg.seasons = seasons;
        }
    }

    let source = FeedSource::from_config(&cfg)?;
    let overrides = cfg.load_standings_overrides()?;
    println!("Parsing Liverpool FC data from {}", source.describe());
    if !overrides.is_empty() {
        println!("Manual standings for {} seasons", overrides.len());
    }

    let output = run_etl(&source, &overrides, &cfg.seasons, cfg.fetch_parallelism);

    for stats in &output.season_stats {
        let season_matches = output
            .matches
            .iter()
            .filter(|m| m.season.id == stats.season.id)
            .collect::<Vec<_>>();
        println!("{}", stats.season.id);
        println!("  matches: {}", season_matches.len());
        println!(
            "  position: {}, points: {}",
            stats.league_position, stats.points
        );
        println!("  W:{} D:{} L:{}", stats.won, stats.drawn, stats.lost);
        println!("  GF:{} GA:{}", stats.goals_for, stats.goals_against);
        if let (Some(first), Some(last)) = (season_matches.first(), season_matches.last()) {
            println!(
                "  first: {} {}-{} {}",
                first.home_team.name, first.home_score, first.away_score, first.away_team.name
            );
            println!(
                "  last:  {} {}-{} {}",
                last.home_team.name, last.home_score, last.away_score, last.away_team.name
            );
        }
    }

    let summary = &output.summary;
    println!(
        "Total: {} matches across {}/{} seasons",
        summary.matches, summary.seasons_succeeded, summary.seasons_total
    );
    println!("Titles: {}", summary.titles);
    if !summary.errors.is_empty() {
        println!("Errors: {}", summary.errors.len());
        for err in &summary.errors {
            println!(" - {err}");
        }
    }

    write_snapshot(&cfg.data_dir, &output.matches, &output.season_stats)?;
    println!("Data saved to {}", cfg.data_dir.display());
    Ok(())
}
