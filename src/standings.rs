use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{Season, StandingsEntry};
use crate::team::is_team_of_interest_name;

static TABLE_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9]+)\s+(.+?)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)-([0-9]+)\s+([0-9]+)\s*$")
        .expect("static regex")
});

/// Parse a league table. Headers, separators and anything else that is not a table row
/// are skipped.
pub fn parse_standings(content: &str, _season: &Season) -> Vec<StandingsEntry> {
    content.lines().filter_map(parse_standings_line).collect()
}

fn parse_standings_line(line: &str) -> Option<StandingsEntry> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('=') || trimmed.starts_with('#') {
        return None;
    }

    let caps = TABLE_ROW.captures(trimmed)?;
    let num = |idx: usize| caps[idx].parse::<u32>().ok();
    Some(StandingsEntry {
        position: num(1)?,
        team: caps[2].trim().to_string(),
        played: num(3)?,
        won: num(4)?,
        drawn: num(5)?,
        lost: num(6)?,
        goals_for: num(7)?,
        goals_against: num(8)?,
        points: num(9)?,
    })
}

/// First row whose team is the team of interest.
pub fn find_team_standing(standings: &[StandingsEntry]) -> Option<&StandingsEntry> {
    standings
        .iter()
        .find(|entry| is_team_of_interest_name(&entry.team))
}

/// Hand-maintained table rows for the team of interest, keyed by season id.
///
/// A season listed here does not need a league table from the feed at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandingsOverrides(BTreeMap<String, StandingsEntry>);

impl StandingsOverrides {
    /// Read a JSON object of `{"<season id>": <standings row>}`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read standings overrides {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid standings overrides in {}", path.display()))
    }

    pub fn insert(&mut self, season_id: impl Into<String>, entry: StandingsEntry) {
        self.0.insert(season_id.into(), entry);
    }

    pub fn get(&self, season_id: &str) -> Option<&StandingsEntry> {
        self.0.get(season_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
