use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::team::TEAM_OF_INTEREST_ID;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: String,
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl Season {
    /// Build a season from an id like `2024-25` or `2024-2025`.
    pub fn from_id(season_id: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidSeasonId(season_id.to_string());
        let (start, end) = season_id.trim().split_once('-').ok_or_else(invalid)?;
        let start_year = expand_year(start).ok_or_else(invalid)?;
        let end_year = expand_year(end).ok_or_else(invalid)?;
        Ok(Self {
            id: season_id.trim().to_string(),
            name: format!(
                "English Premier League {}/{:02}",
                start_year,
                end_year.rem_euclid(100)
            ),
            start_year,
            end_year,
        })
    }
}

fn expand_year(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match raw.len() {
        2 => format!("20{raw}").parse().ok(),
        4 => raw.parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub season: Season,
    pub matchday: u32,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kickoff_time: Option<String>,
    pub home_team: Team,
    pub away_team: Team,
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_time_home_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_time_away_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

impl Match {
    pub fn is_home(&self) -> bool {
        self.home_team.id == TEAM_OF_INTEREST_ID
    }

    pub fn is_away(&self) -> bool {
        self.away_team.id == TEAM_OF_INTEREST_ID
    }

    /// The side that is not the team of interest.
    pub fn opponent(&self) -> &Team {
        if self.is_home() {
            &self.away_team
        } else {
            &self.home_team
        }
    }

    pub fn goals_for(&self) -> u32 {
        if self.is_home() {
            self.home_score
        } else {
            self.away_score
        }
    }

    pub fn goals_against(&self) -> u32 {
        if self.is_home() {
            self.away_score
        } else {
            self.home_score
        }
    }

    /// Result from the team of interest's point of view.
    pub fn outcome(&self) -> Outcome {
        match self.goals_for().cmp(&self.goals_against()) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        let fail = |reason: &str| {
            Err(ParseError::InvalidRecord {
                id: self.id.clone(),
                reason: reason.to_string(),
            })
        };
        if self.id.is_empty() {
            return fail("empty id");
        }
        if self.season.id.is_empty() {
            return fail("empty season id");
        }
        if self.matchday == 0 {
            return fail("matchday must be positive");
        }
        if self.home_team.name.is_empty() || self.away_team.name.is_empty() {
            return fail("empty team name");
        }
        if self.half_time_home_score.is_some() != self.half_time_away_score.is_some() {
            return fail("half-time score is incomplete");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsEntry {
    pub position: u32,
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
}

impl Record {
    pub fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.won += 1,
            Outcome::Draw => self.drawn += 1,
            Outcome::Loss => self.lost += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.won + self.drawn + self.lost
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStats {
    pub season: Season,
    pub league_position: u32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
    pub home_record: Record,
    pub away_record: Record,
}
