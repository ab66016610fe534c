use crate::error::AggregateError;
use crate::model::{Match, Record, Season, SeasonStats, StandingsEntry};

/// Combine a season's fixtures with the team of interest's table row.
///
/// Totals and goal difference come from the table row; the fixtures only provide the
/// home/away split.
pub fn aggregate_season(
    season: &Season,
    matches: &[Match],
    standing: Option<&StandingsEntry>,
) -> Result<SeasonStats, AggregateError> {
    let standing = standing.ok_or_else(|| AggregateError::MissingStanding(season.id.clone()))?;

    let mut home_record = Record::default();
    let mut away_record = Record::default();
    for m in matches {
        if m.is_home() {
            home_record.add(m.outcome());
        } else if m.is_away() {
            away_record.add(m.outcome());
        }
    }

    Ok(SeasonStats {
        season: season.clone(),
        league_position: standing.position,
        played: standing.played,
        won: standing.won,
        drawn: standing.drawn,
        lost: standing.lost,
        goals_for: standing.goals_for,
        goals_against: standing.goals_against,
        goal_difference: i64::from(standing.goals_for) - i64::from(standing.goals_against),
        points: standing.points,
        home_record,
        away_record,
    })
}
