use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::aggregate::aggregate_season;
use crate::feed::{FeedSource, SeasonFeed};
use crate::model::{Match, Season, SeasonStats};
use crate::season_parser::parse_season_file;
use crate::standings::{StandingsOverrides, find_team_standing, parse_standings};

#[derive(Debug, Clone)]
pub struct SeasonOutcome {
    pub season: Season,
    pub matches: Vec<Match>,
    pub stats: SeasonStats,
}

#[derive(Debug, Clone, Default)]
pub struct EtlSummary {
    pub seasons_total: usize,
    pub seasons_succeeded: usize,
    pub matches: usize,
    pub titles: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EtlOutput {
    pub matches: Vec<Match>,
    pub season_stats: Vec<SeasonStats>,
    pub summary: EtlSummary,
}

/// Parse and aggregate one season's raw text. A manual standings row wins over the table.
pub fn process_season(feed: &SeasonFeed) -> Result<SeasonOutcome> {
    let season = Season::from_id(&feed.season_id)?;
    let matches = parse_season_file(&feed.fixtures, &season)
        .with_context(|| format!("parse fixtures for {}", season.id))?;
    let standings = parse_standings(&feed.standings, &season);
    let standing = feed
        .standings_override
        .as_ref()
        .or_else(|| find_team_standing(&standings));
    let stats = aggregate_season(&season, &matches, standing)?;
    Ok(SeasonOutcome {
        season,
        matches,
        stats,
    })
}

/// Fetch and process every season. A failing season is reported and left out; the
/// rest of the run carries on. Output keeps the order of `season_ids`.
pub fn run_etl(
    source: &FeedSource,
    overrides: &StandingsOverrides,
    season_ids: &[String],
    parallelism: usize,
) -> EtlOutput {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism.max(1))
        .build()
        .ok();
    let work = || {
        season_ids
            .par_iter()
            .map(|id| {
                let outcome = source
                    .fetch_season(id, overrides)
                    .and_then(|feed| process_season(&feed));
                (id.as_str(), outcome)
            })
            .collect::<Vec<_>>()
    };
    let results = match pool.as_ref() {
        Some(pool) => pool.install(work),
        None => work(),
    };

    let mut out = EtlOutput::default();
    out.summary.seasons_total = season_ids.len();
    for (id, outcome) in results {
        match outcome {
            Ok(season) => {
                info!(
                    season = id,
                    matches = season.matches.len(),
                    position = season.stats.league_position,
                    points = season.stats.points,
                    "season processed"
                );
                out.summary.seasons_succeeded += 1;
                if season.stats.league_position == 1 {
                    out.summary.titles += 1;
                }
                out.matches.extend(season.matches);
                out.season_stats.push(season.stats);
            }
            Err(err) => {
                warn!(season = id, error = %format!("{err:#}"), "season skipped");
                out.summary.errors.push(format!("season {id}: {err:#}"));
            }
        }
    }
    out.summary.matches = out.matches.len();
    out
}
