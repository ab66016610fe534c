use anyhow::Result;

use lfc_history::config::{self, Config};
use lfc_history::feed::FeedSource;
use lfc_history::logging::init_tracing;

fn main() -> Result<()> {
    config::load_dotenv();
    init_tracing("warn")?;
    let cfg = Config::from_env();
    let source = FeedSource::from_config(&cfg)?;
    let overrides = cfg.load_standings_overrides()?;

    println!("Fetching Liverpool FC data from {}", source.describe());
    let mut failed = 0usize;
    for season_id in &cfg.seasons {
        match source.fetch_season(season_id, &overrides) {
            Ok(feed) => {
                println!("{season_id}");
                println!("  matches: {} lines", feed.fixtures.lines().count());
                if feed.standings_override.is_some() {
                    println!("  standings: manual row");
                } else {
                    println!("  standings: {} lines", feed.standings.lines().count());
                }
            }
            Err(err) => {
                failed += 1;
                println!("{season_id}");
                println!("  error: {err:#}");
            }
        }
    }
    println!(
        "Fetch complete: {}/{} seasons",
        cfg.seasons.len() - failed,
        cfg.seasons.len()
    );
    Ok(())
}
