use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    pub id: String,
    pub name: String,
    pub nationality: String,
    pub start_date: NaiveDate,
    /// `None` while the manager is still in charge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub is_interim: bool,
}

struct ManagerSeed {
    id: &'static str,
    name: &'static str,
    nationality: &'static str,
    start: (i32, u32, u32),
    end: Option<(i32, u32, u32)>,
    trophies: &'static [&'static str],
}

const MANAGERS: &[ManagerSeed] = &[
    ManagerSeed {
        id: "benitez",
        name: "Rafael Benítez",
        nationality: "Spain",
        start: (2004, 6, 16),
        end: Some((2010, 6, 3)),
        trophies: &[
            "Champions League (2005)",
            "FA Cup (2006)",
            "Community Shield (2006)",
        ],
    },
    ManagerSeed {
        id: "hodgson",
        name: "Roy Hodgson",
        nationality: "England",
        start: (2010, 7, 1),
        end: Some((2011, 1, 8)),
        trophies: &[],
    },
    ManagerSeed {
        id: "dalglish",
        name: "Kenny Dalglish",
        nationality: "Scotland",
        start: (2011, 1, 8),
        end: Some((2012, 5, 16)),
        trophies: &["League Cup (2012)"],
    },
    ManagerSeed {
        id: "rodgers",
        name: "Brendan Rodgers",
        nationality: "Northern Ireland",
        start: (2012, 6, 1),
        end: Some((2015, 10, 4)),
        trophies: &[],
    },
    ManagerSeed {
        id: "klopp",
        name: "Jürgen Klopp",
        nationality: "Germany",
        start: (2015, 10, 8),
        end: Some((2024, 5, 19)),
        trophies: &[
            "Champions League (2019)",
            "Premier League (2020)",
            "FA Cup (2022)",
            "League Cup (2022, 2024)",
            "Club World Cup (2019)",
            "UEFA Super Cup (2019)",
            "Community Shield (2022)",
        ],
    },
    ManagerSeed {
        id: "slot",
        name: "Arne Slot",
        nationality: "Netherlands",
        start: (2024, 6, 1),
        end: None,
        trophies: &["Premier League (2025)"],
    },
];

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    // Seeds are literal calendar dates; fall back to the epoch rather than panic.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// The managers reference table, in tenure order.
pub fn managers() -> Vec<Manager> {
    MANAGERS
        .iter()
        .map(|seed| Manager {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            nationality: seed.nationality.to_string(),
            start_date: ymd(seed.start),
            end_date: seed.end.map(ymd),
            is_interim: false,
        })
        .collect()
}

pub fn manager_trophies(manager_id: &str) -> Vec<String> {
    MANAGERS
        .iter()
        .find(|seed| seed.id == manager_id)
        .map(|seed| seed.trophies.iter().map(|t| t.to_string()).collect())
        .unwrap_or_default()
}

/// First manager whose name contains `query`, case-insensitively. Overlapping
/// substrings resolve to whoever comes first in tenure order.
pub fn find_manager<'a>(managers: &'a [Manager], query: &str) -> Option<&'a Manager> {
    let needle = query.to_lowercase();
    managers
        .iter()
        .find(|m| m.name.to_lowercase().contains(&needle))
}
