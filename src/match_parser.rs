use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;
use crate::model::{Match, Season};
use crate::team::{TEAM_OF_INTEREST_ID, normalize_team};

static KICKOFF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2}\.[0-9]{2})\s+(.+)$").expect("static regex"));
static SCORE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+([0-9]+)-([0-9]+)\s+\(([0-9]+)-([0-9]+)\)\s+(.+)$").expect("static regex")
});

/// Parse one fixture line under the given matchday/date context.
///
/// Returns `Ok(None)` for anything that is not a fixture involving the team of interest,
/// including lines without a leading `HH.MM` kickoff time. `_fallback_kickoff` is the
/// previous fixture's time; the current feed format always carries its own, so it is
/// not consulted. `Err` means the assembled record broke the model contract.
pub fn parse_match_line(
    line: &str,
    season: &Season,
    matchday: u32,
    date: NaiveDate,
    _fallback_kickoff: Option<&str>,
) -> Result<Option<Match>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let Some(timed) = KICKOFF.captures(trimmed) else {
        return Ok(None);
    };
    let kickoff_time = timed.get(1).map_or("", |m| m.as_str()).to_string();
    let rest = timed.get(2).map_or("", |m| m.as_str());

    let Some(caps) = SCORE_LINE.captures(rest) else {
        return Ok(None);
    };

    let home_team = normalize_team(&caps[1]);
    let away_team = normalize_team(&caps[6]);
    if home_team.id != TEAM_OF_INTEREST_ID && away_team.id != TEAM_OF_INTEREST_ID {
        return Ok(None);
    }

    let id = format!(
        "{}-md{}-{}-{}",
        season.id, matchday, home_team.id, away_team.id
    );
    let score = |idx: usize| -> Result<u32, ParseError> {
        caps[idx].parse::<u32>().map_err(|_| ParseError::InvalidRecord {
            id: id.clone(),
            reason: format!("score out of range: {}", &caps[idx]),
        })
    };

    let record = Match {
        id: id.clone(),
        season: season.clone(),
        matchday,
        date,
        kickoff_time: Some(kickoff_time),
        home_score: score(2)?,
        away_score: score(3)?,
        half_time_home_score: Some(score(4)?),
        half_time_away_score: Some(score(5)?),
        home_team,
        away_team,
        venue: None,
    };
    record.validate()?;
    Ok(Some(record))
}
