use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::standings::StandingsOverrides;

pub const DEFAULT_FEED_BASE: &str = "https://raw.githubusercontent.com/openfootball/england/master";
const DEFAULT_DATA_DIR: &str = ".data";
const APP_DIR: &str = "lfc_history";
const FIRST_SEASON: i32 = 2004;
const LAST_SEASON: i32 = 2024;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub feed_base_url: String,
    /// Local mirror of the feed; takes precedence over the remote base when set.
    pub feed_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    /// JSON file of manual standings rows, keyed by season id.
    pub standings_overrides: Option<PathBuf>,
    pub seasons: Vec<String>,
    pub fetch_parallelism: usize,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: env_non_empty("LFC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            feed_base_url: env_non_empty("LFC_FEED_BASE")
                .map(|raw| raw.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_FEED_BASE.to_string()),
            feed_dir: env_non_empty("LFC_FEED_DIR").map(PathBuf::from),
            cache_dir: env_non_empty("LFC_CACHE_DIR")
                .map(PathBuf::from)
                .or_else(default_cache_dir),
            standings_overrides: env_non_empty("LFC_STANDINGS_OVERRIDES").map(PathBuf::from),
            seasons: env_non_empty("LFC_SEASONS")
                .map(|raw| parse_season_list(&raw))
                .filter(|list| !list.is_empty())
                .unwrap_or_else(default_seasons),
            fetch_parallelism: env::var("FETCH_PARALLELISM")
                .ok()
                .and_then(|val| val.parse::<usize>().ok())
                .unwrap_or(6)
                .clamp(1, 32),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(10)
                .max(1),
        }
    }

    /// Manual standings rows from `standings_overrides`; none when it is unset.
    pub fn load_standings_overrides(&self) -> Result<StandingsOverrides> {
        match self.standings_overrides.as_deref() {
            Some(path) => StandingsOverrides::load(path),
            None => Ok(StandingsOverrides::default()),
        }
    }
}

/// Value of `--flag=value` or `--flag value` in `args`; blank values count as absent.
pub fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}

/// Load `.env.local` then `.env`; missing files are fine.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

pub fn default_seasons() -> Vec<String> {
    (FIRST_SEASON..=LAST_SEASON)
        .map(|year| format!("{}-{:02}", year, (year + 1) % 100))
        .collect()
}

pub fn parse_season_list(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in raw.split([',', ';', ' ']) {
        let part = part.trim();
        if !part.is_empty() && !out.iter().any(|s| s == part) {
            out.push(part.to_string());
        }
    }
    out
}

fn default_cache_dir() -> Option<PathBuf> {
    if let Some(base) = env_non_empty("XDG_CACHE_HOME") {
        return Some(PathBuf::from(base).join(APP_DIR));
    }
    let home = env_non_empty("HOME")?;
    Some(PathBuf::from(home).join(".cache").join(APP_DIR))
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}
