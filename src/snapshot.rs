use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::unsync::OnceCell;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::{Match, SeasonStats};

pub const MATCHES_FILE: &str = "matches.json";
pub const SEASON_STATS_FILE: &str = "season-stats.json";

/// Write both snapshot files, replacing any previous snapshot wholesale.
pub fn write_snapshot(dir: &Path, matches: &[Match], season_stats: &[SeasonStats]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create data dir {}", dir.display()))?;
    write_json(&dir.join(MATCHES_FILE), matches)?;
    write_json(&dir.join(SEASON_STATS_FILE), season_stats)?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serialize {}", path.display()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid json in {}", path.display()))
}

/// Read-only view of a snapshot directory. Each file is loaded on first use and kept
/// for the life of the store.
#[derive(Debug)]
pub struct SnapshotStore {
    dir: PathBuf,
    matches: OnceCell<Vec<Match>>,
    season_stats: OnceCell<Vec<SeasonStats>>,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            matches: OnceCell::new(),
            season_stats: OnceCell::new(),
        }
    }

    pub fn matches(&self) -> Result<&[Match]> {
        self.matches
            .get_or_try_init(|| read_json(&self.dir.join(MATCHES_FILE)))
            .map(Vec::as_slice)
    }

    pub fn season_stats(&self) -> Result<&[SeasonStats]> {
        self.season_stats
            .get_or_try_init(|| read_json(&self.dir.join(SEASON_STATS_FILE)))
            .map(Vec::as_slice)
    }
}
