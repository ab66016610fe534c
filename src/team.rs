use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Team;

pub const TEAM_OF_INTEREST_ID: &str = "liverpool";
pub const TEAM_OF_INTEREST_NAME: &str = "Liverpool FC";
const TEAM_OF_INTEREST_SHORT: &str = "Liverpool";
/// Any spelling containing this (case-insensitive) is the team of interest.
const TEAM_OF_INTEREST_KEY: &str = "liverpool";

static FC_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+fc$").expect("static regex"));
static UNITED_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+united$").expect("static regex"));
static CITY_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+city$").expect("static regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("static regex"));

pub fn team_of_interest() -> Team {
    Team {
        id: TEAM_OF_INTEREST_ID.to_string(),
        name: TEAM_OF_INTEREST_NAME.to_string(),
        short_name: Some(TEAM_OF_INTEREST_SHORT.to_string()),
    }
}

pub fn is_team_of_interest_name(name: &str) -> bool {
    name.to_lowercase().contains(TEAM_OF_INTEREST_KEY)
}

/// Map a feed spelling to a canonical team. Never fails; odd input can give an empty id.
pub fn normalize_team(raw: &str) -> Team {
    let name = raw.trim();
    if is_team_of_interest_name(name) {
        return team_of_interest();
    }

    Team {
        id: team_slug(name),
        name: name.to_string(),
        short_name: Some(FC_SUFFIX.replace(name, "").into_owned()),
    }
}

pub fn team_slug(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let slug = FC_SUFFIX.replace(&lower, "");
    let slug = UNITED_SUFFIX.replace(&slug, "-united");
    let slug = CITY_SUFFIX.replace(&slug, "-city");
    let slug = WHITESPACE.replace_all(&slug, "-");
    NON_SLUG.replace_all(&slug, "").into_owned()
}
