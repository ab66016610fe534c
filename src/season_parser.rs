use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::ParseError;
use crate::match_parser::parse_match_line;
use crate::model::{Match, Season};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
/// Month index (0-based) where a season starts; earlier months belong to the next year.
const SEASON_START_MONTH: u32 = 7;

static MATCHDAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:»\s+)?Matchday\s+([0-9]+)").expect("static regex"));
static BRACKETED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\w+)\s+(\w+)/([0-9]+)\]").expect("static regex"));
static DATE_WITH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s+(\w+)/([0-9]+)\s+([0-9]{4})$").expect("static regex"));
static DATE_NO_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s+(\w+)/([0-9]+)$").expect("static regex"));

/// What a single trimmed feed line is, tried in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Matchday(u32),
    BracketedDate { month: &'a str, day: &'a str },
    DateWithYear { month: &'a str, day: &'a str, year: i32 },
    Date { month: &'a str, day: &'a str },
    Other,
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if let Some(caps) = MATCHDAY.captures(trimmed)
        && let Ok(n) = caps[1].parse::<u32>()
    {
        return LineKind::Matchday(n);
    }
    if let Some(caps) = BRACKETED_DATE.captures(trimmed)
        && let (Some(month), Some(day)) = (caps.get(2), caps.get(3))
    {
        return LineKind::BracketedDate {
            month: month.as_str(),
            day: day.as_str(),
        };
    }
    if let Some(caps) = DATE_WITH_YEAR.captures(trimmed)
        && let (Some(month), Some(day), Ok(year)) = (caps.get(2), caps.get(3), caps[4].parse::<i32>())
    {
        return LineKind::DateWithYear {
            month: month.as_str(),
            day: day.as_str(),
            year,
        };
    }
    if let Some(caps) = DATE_NO_YEAR.captures(trimmed)
        && let (Some(month), Some(day)) = (caps.get(2), caps.get(3))
    {
        return LineKind::Date {
            month: month.as_str(),
            day: day.as_str(),
        };
    }
    LineKind::Other
}

/// Resolve a month name by its first three letters, case-insensitively.
pub fn month_index(month: &str) -> Result<u32, ParseError> {
    let key: String = month.to_lowercase().chars().take(3).collect();
    MONTHS
        .iter()
        .position(|m| *m == key)
        .map(|idx| idx as u32)
        .ok_or_else(|| ParseError::UnknownMonth(month.to_string()))
}

fn make_date(year: i32, month: &str, day: &str) -> Result<NaiveDate, ParseError> {
    let idx = month_index(month)?;
    let invalid = || ParseError::InvalidDate {
        year,
        month: month.to_string(),
        day: day.to_string(),
    };
    let day = day.parse::<u32>().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, idx + 1, day).ok_or_else(invalid)
}

/// Running context carried from line to line within one season file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState {
    pub matchday: u32,
    pub date: Option<NaiveDate>,
    pub year: i32,
    pub last_month: Option<u32>,
    pub last_kickoff_time: Option<String>,
}

impl ParseState {
    pub fn new(season: &Season) -> Self {
        Self {
            matchday: 0,
            date: None,
            year: season.start_year,
            last_month: None,
            last_kickoff_time: None,
        }
    }

    /// Advance over one raw line, returning the fixture it produced, if any.
    pub fn step(&mut self, line: &str, season: &Season) -> Result<Option<Match>, ParseError> {
        match classify_line(line) {
            LineKind::Matchday(n) => {
                self.matchday = n;
            }
            LineKind::BracketedDate { month, day } => {
                let year = if month_index(month)? >= SEASON_START_MONTH {
                    season.start_year
                } else {
                    season.start_year + 1
                };
                self.date = Some(make_date(year, month, day)?);
            }
            LineKind::DateWithYear { month, day, year } => {
                self.date = Some(make_date(year, month, day)?);
                self.year = year;
                self.last_month = Some(month_index(month)?);
            }
            LineKind::Date { month, day } => {
                let idx = month_index(month)?;
                if self
                    .last_month
                    .is_some_and(|last| last >= SEASON_START_MONTH && idx < SEASON_START_MONTH)
                {
                    self.year += 1;
                }
                self.last_month = Some(idx);
                self.date = Some(make_date(self.year, month, day)?);
            }
            LineKind::Other => {
                let Some(date) = self.date else {
                    return Ok(None);
                };
                if self.matchday == 0 {
                    return Ok(None);
                }
                let parsed = parse_match_line(
                    line,
                    season,
                    self.matchday,
                    date,
                    self.last_kickoff_time.as_deref(),
                )?;
                if let Some(time) = parsed.as_ref().and_then(|m| m.kickoff_time.clone()) {
                    self.last_kickoff_time = Some(time);
                }
                return Ok(parsed);
            }
        }
        Ok(None)
    }
}

/// Parse a whole season's fixture list, keeping the team of interest's matches in file order.
pub fn parse_season_file(content: &str, season: &Season) -> Result<Vec<Match>, ParseError> {
    let mut state = ParseState::new(season);
    let mut matches = Vec::new();
    for line in content.lines() {
        if let Some(m) = state.step(line, season)? {
            matches.push(m);
        }
    }
    debug!(season = %season.id, matches = matches.len(), "parsed season file");
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season() -> Season {
        Season::from_id("2024-25").unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn classifies_headers() {
        assert_eq!(classify_line("» Matchday 12"), LineKind::Matchday(12));
        assert_eq!(classify_line("matchday 3"), LineKind::Matchday(3));
        assert_eq!(
            classify_line("[Sat Aug/16]"),
            LineKind::BracketedDate { month: "Aug", day: "16" }
        );
        assert_eq!(
            classify_line("  Fri Aug/16 2024"),
            LineKind::DateWithYear { month: "Aug", day: "16", year: 2024 }
        );
        assert_eq!(
            classify_line("  Sat Dec/28"),
            LineKind::Date { month: "Dec", day: "28" }
        );
        assert_eq!(classify_line("15.00 Liverpool FC 2-1 (1-0) Chelsea FC"), LineKind::Other);
    }

    #[test]
    fn month_lookup_uses_prefix() {
        assert_eq!(month_index("Jan").unwrap(), 0);
        assert_eq!(month_index("SEPT").unwrap(), 8);
        assert_eq!(month_index("december").unwrap(), 11);
        assert_eq!(month_index("Foo"), Err(ParseError::UnknownMonth("Foo".to_string())));
    }

    #[test]
    fn year_rolls_over_from_december_to_january() {
        let s = season();
        let mut state = ParseState::new(&s);
        state.step("Sat Dec/28", &s).unwrap();
        assert_eq!(state.last_month, Some(11));
        assert_eq!(state.date, Some(ymd(2024, 12, 28)));
        state.step("Wed Jan/4", &s).unwrap();
        assert_eq!(state.year, 2025);
        assert_eq!(state.date, Some(ymd(2025, 1, 4)));
    }

    #[test]
    fn same_half_season_keeps_year() {
        let s = season();
        let mut state = ParseState::new(&s);
        for line in ["Sat Aug/17", "Sun Sep/1", "Sat Oct/5", "Sun Dec/1"] {
            state.step(line, &s).unwrap();
            assert_eq!(state.year, 2024);
        }
        for line in ["Sat Jan/4", "Sat Feb/1", "Sun May/25"] {
            state.step(line, &s).unwrap();
            assert_eq!(state.year, 2025);
        }
    }

    #[test]
    fn bracketed_date_uses_season_halves() {
        let s = season();
        let mut state = ParseState::new(&s);
        state.step("[Sat Aug/17]", &s).unwrap();
        assert_eq!(state.date, Some(ymd(2024, 8, 17)));
        state.step("[Sat Mar/8]", &s).unwrap();
        assert_eq!(state.date, Some(ymd(2025, 3, 8)));
        assert_eq!(state.last_month, None);
        assert_eq!(state.year, 2024);
    }

    #[test]
    fn explicit_year_resets_running_year() {
        let s = season();
        let mut state = ParseState::new(&s);
        state.step("Wed Jan/1 2025", &s).unwrap();
        assert_eq!(state.year, 2025);
        assert_eq!(state.last_month, Some(0));
        state.step("Sat Jan/4", &s).unwrap();
        assert_eq!(state.date, Some(ymd(2025, 1, 4)));
    }

    #[test]
    fn fixtures_need_matchday_and_date() {
        let s = season();
        let mut state = ParseState::new(&s);
        let line = "15.00 Liverpool FC 2-1 (1-0) Chelsea FC";
        assert_eq!(state.step(line, &s).unwrap(), None);
        state.step("Matchday 1", &s).unwrap();
        assert_eq!(state.step(line, &s).unwrap(), None);
        state.step("Sat Aug/17", &s).unwrap();
        assert!(state.step(line, &s).unwrap().is_some());
    }

    #[test]
    fn unknown_month_aborts_the_season() {
        let s = season();
        let text = "Matchday 1\nSat Foo/17\n15.00 Liverpool FC 2-1 (1-0) Chelsea FC\n";
        assert_eq!(
            parse_season_file(text, &s),
            Err(ParseError::UnknownMonth("Foo".to_string()))
        );
    }

    #[test]
    fn impossible_date_aborts_the_season() {
        let s = season();
        assert!(matches!(
            parse_season_file("Sat Feb/30", &s),
            Err(ParseError::InvalidDate { .. })
        ));
    }

    #[test]
    fn untimed_fixture_lines_are_skipped() {
        let s = season();
        let text = "\
» Matchday 2
  Sat Aug/24
    15.00  Brighton & Hove Albion  2-1 (1-0)  Manchester United FC
           Liverpool FC            2-0 (0-0)  Brentford FC
";
        assert!(parse_season_file(text, &s).unwrap().is_empty());
    }

    #[test]
    fn last_kickoff_comes_from_retained_fixtures() {
        let s = season();
        let mut state = ParseState::new(&s);
        state.step("Matchday 1", &s).unwrap();
        state.step("Sat Aug/17", &s).unwrap();
        state.step("12.30 Arsenal FC 2-0 (1-0) Chelsea FC", &s).unwrap();
        assert_eq!(state.last_kickoff_time, None);
        state.step("17.30 Liverpool FC 2-0 (1-0) Brentford FC", &s).unwrap();
        assert_eq!(state.last_kickoff_time.as_deref(), Some("17.30"));
        state.step("20.00 Arsenal FC 1-1 (0-0) Everton FC", &s).unwrap();
        assert_eq!(state.last_kickoff_time.as_deref(), Some("17.30"));
    }

    #[test]
    fn non_ascii_digits_do_not_make_headers() {
        assert_eq!(classify_line("Matchday \u{663}"), LineKind::Other);
        assert_eq!(classify_line("Sat Aug/\u{661}\u{667}"), LineKind::Other);
    }
}
