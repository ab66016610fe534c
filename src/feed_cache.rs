use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const CACHE_VERSION: u32 = 1;
const CACHE_FILE: &str = "feed_cache.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct FeedCacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: u64,
}

/// On-disk cache of fetched feed files, revalidated with ETag / Last-Modified.
///
/// Owned by whoever runs the fetches; nothing is shared between instances.
#[derive(Debug)]
pub struct FeedCache {
    path: Option<PathBuf>,
    file: Mutex<FeedCacheFile>,
}

impl FeedCache {
    /// Open the cache stored under `dir`. `None` keeps the cache in memory only.
    pub fn open(dir: Option<&Path>) -> Self {
        let path = dir.map(|d| d.join(CACHE_FILE));
        let file = path.as_deref().map(load_cache_file).unwrap_or_default();
        Self {
            path,
            file: Mutex::new(file),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fetch_text(&self, client: &Client, url: &str) -> Result<String> {
        let cached = self.lock().entries.get(url).cloned();

        let mut req = client.get(url).header(USER_AGENT, "lfc_history");
        if let Some(entry) = cached.as_ref() {
            if let Some(etag) = entry.etag.as_ref() {
                req = req.header(IF_NONE_MATCH, etag);
            }
            if let Some(last_modified) = entry.last_modified.as_ref() {
                req = req.header(IF_MODIFIED_SINCE, last_modified);
            }
        }

        let resp = req.send().with_context(|| format!("request failed: {url}"))?;
        let status = resp.status();
        if status == StatusCode::NOT_MODIFIED {
            let Some(entry) = cached else {
                return Err(anyhow!("received 304 without cache body for {url}"));
            };
            debug!(%url, "feed not modified");
            return Ok(entry.body);
        }

        let headers = resp.headers().clone();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow!("http {status} for {url}"));
        }

        let header_value = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        self.store(
            url,
            CacheEntry {
                body: body.clone(),
                etag: header_value(ETAG),
                last_modified: header_value(LAST_MODIFIED),
                fetched_at: now_secs(),
            },
        );
        Ok(body)
    }

    fn store(&self, url: &str, entry: CacheEntry) {
        let mut file = self.lock();
        file.version = CACHE_VERSION;
        file.entries.insert(url.to_string(), entry);
        if let Some(path) = self.path.as_deref()
            && let Err(err) = save_cache_file(path, &file)
        {
            warn!(error = %err, "failed to persist feed cache");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FeedCacheFile> {
        self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn load_cache_file(path: &Path) -> FeedCacheFile {
    let Ok(raw) = fs::read_to_string(path) else {
        return FeedCacheFile::default();
    };
    let cache = serde_json::from_str::<FeedCacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return FeedCacheFile::default();
    }
    cache
}

fn save_cache_file(path: &Path, cache: &FeedCacheFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize feed cache")?;
    fs::write(&tmp, json).context("write feed cache")?;
    fs::rename(&tmp, path).context("swap feed cache")?;
    Ok(())
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
