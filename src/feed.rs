use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::debug;

use crate::config::Config;
use crate::feed_cache::FeedCache;
use crate::model::StandingsEntry;
use crate::standings::StandingsOverrides;

const FIXTURES_FILE: &str = "1-premierleague.txt";
const STANDINGS_FILE: &str = ".conf.txt";

/// Raw text of one season: the fixture list and the league table.
///
/// With a manual standings row the table is not fetched and `standings` stays empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonFeed {
    pub season_id: String,
    pub fixtures: String,
    pub standings: String,
    pub standings_override: Option<StandingsEntry>,
}

#[derive(Debug)]
pub struct RemoteFeed {
    client: Client,
    base_url: String,
    cache: FeedCache,
}

#[derive(Debug)]
pub enum FeedSource {
    Remote(RemoteFeed),
    /// A directory laid out like the remote repository (`<season>/<file>`).
    Local(PathBuf),
}

impl FeedSource {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        if let Some(dir) = cfg.feed_dir.as_ref() {
            return Ok(Self::Local(dir.clone()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()
            .context("failed to build http client")?;
        Ok(Self::Remote(RemoteFeed {
            client,
            base_url: cfg.feed_base_url.clone(),
            cache: FeedCache::open(cfg.cache_dir.as_deref()),
        }))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Remote(remote) => remote.base_url.clone(),
            Self::Local(dir) => dir.display().to_string(),
        }
    }

    pub fn fetch_season(&self, season_id: &str, overrides: &StandingsOverrides) -> Result<SeasonFeed> {
        let fixtures = match self {
            Self::Remote(remote) => remote
                .fetch(&file_url(&remote.base_url, season_id, FIXTURES_FILE))
                .with_context(|| format!("failed to fetch matches for {season_id}"))?,
            Self::Local(dir) => read_local(dir, season_id, FIXTURES_FILE)?,
        };

        let standings_override = overrides.get(season_id).cloned();
        let standings = if standings_override.is_some() {
            debug!(season = season_id, "using manual standings row");
            String::new()
        } else {
            match self {
                Self::Remote(remote) => remote
                    .fetch(&file_url(&remote.base_url, season_id, STANDINGS_FILE))
                    .with_context(|| format!("failed to fetch standings for {season_id}"))?,
                Self::Local(dir) => read_local(dir, season_id, STANDINGS_FILE)?,
            }
        };

        Ok(SeasonFeed {
            season_id: season_id.to_string(),
            fixtures,
            standings,
            standings_override,
        })
    }
}

impl RemoteFeed {
    fn fetch(&self, url: &str) -> Result<String> {
        self.cache.fetch_text(&self.client, url)
    }
}

pub fn file_url(base_url: &str, season_id: &str, file: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), season_id, file)
}

fn read_local(dir: &Path, season_id: &str, file: &str) -> Result<String> {
    let path = dir.join(season_id).join(file);
    fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
}
