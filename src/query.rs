use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::managers::{Manager, find_manager, manager_trophies};
use crate::model::{Match, Outcome};

const RECENT_MATCHES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadQuery {
    pub opponent: String,
    #[serde(default)]
    pub last_years: Option<u32>,
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMatch {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHead {
    pub opponent: String,
    pub matches: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub recent_matches: Vec<RecentMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonQuery {
    pub manager1: String,
    pub manager2: String,
    #[serde(default)]
    pub months: Option<u32>,
    #[serde(default)]
    pub matches: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerStats {
    pub manager: String,
    pub matches: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub points: u32,
    pub points_per_game: String,
    pub win_percentage: String,
    pub trophies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub period: String,
    pub manager1: ManagerStats,
    pub manager2: ManagerStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerComparison {
    pub comparison: Comparison,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    matches: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_for: u64,
    goals_against: u64,
}

impl Tally {
    fn from_matches<'a>(matches: impl IntoIterator<Item = &'a Match>) -> Self {
        let mut out = Self::default();
        for m in matches {
            out.matches += 1;
            match m.outcome() {
                Outcome::Win => out.wins += 1,
                Outcome::Draw => out.draws += 1,
                Outcome::Loss => out.losses += 1,
            }
            out.goals_for = out.goals_for.saturating_add(u64::from(m.goals_for()));
            out.goals_against = out.goals_against.saturating_add(u64::from(m.goals_against()));
        }
        out
    }

    fn points(&self) -> u32 {
        self.wins * 3 + self.draws
    }
}

/// Record against every opponent whose name contains `query.opponent`.
///
/// Date bounds are inclusive; `last_years` counts back from `today`.
pub fn head_to_head(matches: &[Match], query: &HeadToHeadQuery, today: NaiveDate) -> HeadToHead {
    let needle = query.opponent.to_lowercase();
    let cutoff = query
        .last_years
        .filter(|years| *years > 0)
        .map(|years| {
            today
                .checked_sub_months(Months::new(years.saturating_mul(12)))
                .unwrap_or(NaiveDate::MIN)
        });

    let filtered: Vec<&Match> = matches
        .iter()
        .filter(|m| m.opponent().name.to_lowercase().contains(&needle))
        .filter(|m| cutoff.is_none_or(|c| m.date >= c))
        .filter(|m| query.from_date.is_none_or(|from| m.date >= from))
        .filter(|m| query.to_date.is_none_or(|to| m.date <= to))
        .collect();

    let tally = Tally::from_matches(filtered.iter().copied());
    let recent_matches = filtered[filtered.len().saturating_sub(RECENT_MATCHES)..]
        .iter()
        .map(|m| RecentMatch {
            date: m.date,
            home_team: m.home_team.name.clone(),
            away_team: m.away_team.name.clone(),
            score: format!("{}-{}", m.home_score, m.away_score),
        })
        .collect();

    HeadToHead {
        opponent: query.opponent.clone(),
        matches: tally.matches,
        wins: tally.wins,
        draws: tally.draws,
        losses: tally.losses,
        goals_for: tally.goals_for,
        goals_against: tally.goals_against,
        recent_matches,
    }
}

#[derive(Debug, Clone, Copy)]
enum Window {
    Matches(u32),
    Months(u32),
}

/// Compare two managers over their first N matches or first N months in charge.
///
/// `matches` takes precedence when both windows are given; a zero window counts as absent.
pub fn compare_managers(
    matches: &[Match],
    managers: &[Manager],
    query: &ComparisonQuery,
    today: NaiveDate,
) -> Result<ManagerComparison, QueryError> {
    let window = match (query.matches.filter(|n| *n > 0), query.months.filter(|n| *n > 0)) {
        (Some(n), _) => Window::Matches(n),
        (None, Some(n)) => Window::Months(n),
        (None, None) => return Err(QueryError::MissingWindow),
    };

    let first = find_manager(managers, &query.manager1).ok_or(QueryError::ManagerNotFound)?;
    let second = find_manager(managers, &query.manager2).ok_or(QueryError::ManagerNotFound)?;

    let period = match window {
        Window::Matches(n) => format!("First {n} matches"),
        Window::Months(n) => format!("First {n} months"),
    };

    Ok(ManagerComparison {
        comparison: Comparison {
            period,
            manager1: manager_stats(matches, first, window, today),
            manager2: manager_stats(matches, second, window, today),
        },
    })
}

fn manager_stats(matches: &[Match], manager: &Manager, window: Window, today: NaiveDate) -> ManagerStats {
    let start = manager.start_date;
    let end = manager.end_date.unwrap_or(today);
    let in_tenure = matches.iter().filter(|m| m.date >= start && m.date <= end);

    let tally = match window {
        Window::Matches(n) => Tally::from_matches(in_tenure.take(n as usize)),
        Window::Months(n) => {
            let limit = start
                .checked_add_months(Months::new(n))
                .unwrap_or(NaiveDate::MAX);
            Tally::from_matches(in_tenure.filter(|m| m.date < limit))
        }
    };

    let points = tally.points();
    let (ppg, win_pct) = if tally.matches > 0 {
        let n = f64::from(tally.matches);
        (f64::from(points) / n, f64::from(tally.wins) / n * 100.0)
    } else {
        (0.0, 0.0)
    };

    ManagerStats {
        manager: manager.name.clone(),
        matches: tally.matches,
        wins: tally.wins,
        draws: tally.draws,
        losses: tally.losses,
        goals_for: tally.goals_for,
        goals_against: tally.goals_against,
        points,
        points_per_game: to_fixed(ppg, 2),
        win_percentage: to_fixed(win_pct, 1),
        trophies: manager_trophies(&manager.id),
    }
}

/// Format with `digits` decimals, rounding ties away from zero (`2.125` -> `"2.13"`).
fn to_fixed(value: f64, digits: i32) -> String {
    let scale = 10f64.powi(digits);
    let rounded = (value * scale).round() / scale;
    format!("{rounded:.prec$}", prec = digits as usize)
}
