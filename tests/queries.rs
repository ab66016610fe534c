use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use lfc_history::error::QueryError;
use lfc_history::managers::managers;
use lfc_history::model::{Match, Season};
use lfc_history::query::{ComparisonQuery, HeadToHeadQuery, compare_managers, head_to_head};
use lfc_history::season_parser::parse_season_file;

const SLOT_SEASON: &str = "\
» Matchday 1
  Sat Aug/17 2024
    12.30  Ipswich Town FC            0-2 (0-0)  Liverpool FC
» Matchday 2
  Sun Aug/25
    17.30  Liverpool FC               2-0 (1-0)  Brentford FC
» Matchday 3
  Sun Sep/1
    16.00  Manchester United FC       0-3 (0-2)  Liverpool FC
» Matchday 4
  Sat Sep/14
    15.00  Liverpool FC               0-1 (0-0)  Nottingham Forest FC
» Matchday 20
  Sun Jan/5
    16.30  Liverpool FC               2-2 (0-1)  Manchester United FC
";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    ymd(2025, 6, 1)
}

fn history() -> Vec<Match> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/feed/2019-20/1-premierleague.txt");
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    let mut matches = parse_season_file(&raw, &Season::from_id("2019-20").unwrap()).unwrap();
    matches.extend(parse_season_file(SLOT_SEASON, &Season::from_id("2024-25").unwrap()).unwrap());
    matches
}

fn h2h(opponent: &str) -> HeadToHeadQuery {
    HeadToHeadQuery {
        opponent: opponent.to_string(),
        ..HeadToHeadQuery::default()
    }
}

#[test]
fn head_to_head_across_seasons() {
    let result = head_to_head(&history(), &h2h("manchester united"), today());
    assert_eq!(result.opponent, "manchester united");
    assert_eq!(result.matches, 3);
    assert_eq!((result.wins, result.draws, result.losses), (2, 1, 0));
    assert_eq!((result.goals_for, result.goals_against), (7, 2));
    let scores = result
        .recent_matches
        .iter()
        .map(|m| m.score.as_str())
        .collect::<Vec<_>>();
    assert_eq!(scores, vec!["2-0", "0-3", "2-2"]);
    assert_eq!(result.recent_matches[1].home_team, "Manchester United FC");
}

#[test]
fn head_to_head_substring_spans_clubs() {
    let result = head_to_head(&history(), &h2h("Manchester"), today());
    assert_eq!(result.matches, 4);
    assert_eq!((result.wins, result.draws, result.losses), (2, 1, 1));
    assert_eq!(result.wins + result.draws + result.losses, result.matches);
}

#[test]
fn head_to_head_date_windows() {
    let matches = history();

    let recent = HeadToHeadQuery {
        last_years: Some(2),
        ..h2h("united")
    };
    let result = head_to_head(&matches, &recent, today());
    assert_eq!(result.matches, 2);

    let single_day = HeadToHeadQuery {
        from_date: Some(ymd(2020, 1, 19)),
        to_date: Some(ymd(2020, 1, 19)),
        ..h2h("manchester united")
    };
    let result = head_to_head(&matches, &single_day, today());
    assert_eq!(result.matches, 1);
    assert_eq!(result.recent_matches[0].date, ymd(2020, 1, 19));
}

#[test]
fn head_to_head_keeps_last_five() {
    let result = head_to_head(&history(), &h2h(""), today());
    assert_eq!(result.matches, 17);
    assert_eq!(result.wins + result.draws + result.losses, 17);
    assert_eq!(result.recent_matches.len(), 5);
    assert_eq!(result.recent_matches[0].date, ymd(2024, 8, 17));
    assert_eq!(result.recent_matches[4].date, ymd(2025, 1, 5));
}

#[test]
fn head_to_head_unknown_opponent_is_empty() {
    let result = head_to_head(&history(), &h2h("Real Madrid"), today());
    assert_eq!(result.matches, 0);
    assert!(result.recent_matches.is_empty());
}

#[test]
fn compare_first_matches() {
    let query = ComparisonQuery {
        manager1: "Klopp".to_string(),
        manager2: "Slot".to_string(),
        months: None,
        matches: Some(3),
    };
    let result = compare_managers(&history(), &managers(), &query, today()).unwrap();
    let c = result.comparison;
    assert_eq!(c.period, "First 3 matches");

    assert_eq!(c.manager1.manager, "Jürgen Klopp");
    assert_eq!(c.manager1.matches, 3);
    assert_eq!(c.manager1.points, 9);
    assert_eq!((c.manager1.goals_for, c.manager1.goals_against), (7, 2));
    assert_eq!(c.manager1.points_per_game, "3.00");
    assert_eq!(c.manager1.win_percentage, "100.0");
    assert!(c.manager1.trophies.contains(&"Premier League (2020)".to_string()));

    assert_eq!(c.manager2.manager, "Arne Slot");
    assert_eq!((c.manager2.goals_for, c.manager2.goals_against), (7, 0));
}

#[test]
fn compare_window_larger_than_tenure() {
    let query = ComparisonQuery {
        manager1: "klopp".to_string(),
        manager2: "slot".to_string(),
        months: None,
        matches: Some(10),
    };
    let c = compare_managers(&history(), &managers(), &query, today())
        .unwrap()
        .comparison;
    assert_eq!(c.manager1.matches, 10);
    assert_eq!(c.manager2.matches, 5);
    assert_eq!((c.manager2.wins, c.manager2.draws, c.manager2.losses), (3, 1, 1));
    assert_eq!(c.manager2.points, 10);
    assert_eq!(c.manager2.points_per_game, "2.00");
    assert_eq!(c.manager2.win_percentage, "60.0");
}

#[test]
fn compare_first_months() {
    let query = ComparisonQuery {
        manager1: "Slot".to_string(),
        manager2: "Klopp".to_string(),
        months: Some(3),
        matches: None,
    };
    let c = compare_managers(&history(), &managers(), &query, today())
        .unwrap()
        .comparison;
    assert_eq!(c.period, "First 3 months");
    // Slot started 2024-06-01; the window ends before 2024-09-01.
    assert_eq!(c.manager1.matches, 2);
    // No Klopp matches in the first three months of his tenure in this history.
    assert_eq!(c.manager2.matches, 0);
    assert_eq!(c.manager2.points_per_game, "0.00");
    assert_eq!(c.manager2.win_percentage, "0.0");
}

#[test]
fn compare_prefers_match_window() {
    let query = ComparisonQuery {
        manager1: "Klopp".to_string(),
        manager2: "Slot".to_string(),
        months: Some(1),
        matches: Some(2),
    };
    let c = compare_managers(&history(), &managers(), &query, today())
        .unwrap()
        .comparison;
    assert_eq!(c.period, "First 2 matches");
    assert_eq!(c.manager1.matches, 2);
}

#[test]
fn compare_errors_are_values() {
    let matches = history();
    let table = managers();

    let no_window = ComparisonQuery {
        manager1: "Klopp".to_string(),
        manager2: "Slot".to_string(),
        ..ComparisonQuery::default()
    };
    assert_eq!(
        compare_managers(&matches, &table, &no_window, today()),
        Err(QueryError::MissingWindow)
    );

    let zero_window = ComparisonQuery {
        matches: Some(0),
        ..no_window.clone()
    };
    assert_eq!(
        compare_managers(&matches, &table, &zero_window, today()),
        Err(QueryError::MissingWindow)
    );

    let unknown = ComparisonQuery {
        manager2: "Mourinho".to_string(),
        matches: Some(5),
        ..no_window
    };
    let err = compare_managers(&matches, &table, &unknown, today()).unwrap_err();
    assert_eq!(err, QueryError::ManagerNotFound);
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        serde_json::json!({ "error": "Manager not found" })
    );
}

const SLOT_EIGHT: &str = "\
» Matchday 1
  Sat Aug/17 2024
    12.30  Ipswich Town FC            0-2 (0-0)  Liverpool FC
» Matchday 2
  Sun Aug/25
    17.30  Liverpool FC               2-0 (1-0)  Brentford FC
» Matchday 3
  Sun Sep/1
    16.00  Manchester United FC       0-3 (0-2)  Liverpool FC
» Matchday 4
  Sat Sep/14
    15.00  Liverpool FC               0-1 (0-0)  Nottingham Forest FC
» Matchday 5
  Sat Sep/21
    15.00  Liverpool FC               3-0 (1-0)  AFC Bournemouth
» Matchday 6
  Sat Sep/28
    17.30  Wolverhampton Wanderers FC 1-2 (0-1)  Liverpool FC
» Matchday 7
  Sat Oct/5
    12.30  Crystal Palace FC          1-1 (0-1)  Liverpool FC
» Matchday 8
  Sun Oct/20
    16.30  Liverpool FC               2-2 (1-1)  Chelsea FC
";

#[test]
fn compare_rounds_ties_up() {
    let matches = parse_season_file(SLOT_EIGHT, &Season::from_id("2024-25").unwrap()).unwrap();
    let query = ComparisonQuery {
        manager1: "Slot".to_string(),
        manager2: "Klopp".to_string(),
        months: None,
        matches: Some(8),
    };
    let c = compare_managers(&matches, &managers(), &query, today())
        .unwrap()
        .comparison;
    assert_eq!(c.manager1.matches, 8);
    assert_eq!((c.manager1.wins, c.manager1.draws, c.manager1.losses), (5, 2, 1));
    assert_eq!(c.manager1.points, 17);
    assert_eq!(c.manager1.points_per_game, "2.13");
    assert_eq!(c.manager1.win_percentage, "62.5");
}

#[test]
fn huge_scores_do_not_overflow_totals() {
    let text = "\
» Matchday 1
  Sat Aug/17 2024
    12.30  Liverpool FC               4294967295-0 (0-0)  Everton FC
» Matchday 2
  Sat Aug/24
    12.30  Everton FC                 0-4294967295 (0-0)  Liverpool FC
";
    let matches = parse_season_file(text, &Season::from_id("2024-25").unwrap()).unwrap();
    assert_eq!(matches.len(), 2);

    let result = head_to_head(&matches, &h2h("everton"), today());
    assert_eq!(result.goals_for, 2 * u64::from(u32::MAX));
    assert_eq!(result.goals_against, 0);

    let query = ComparisonQuery {
        manager1: "Slot".to_string(),
        manager2: "Slot".to_string(),
        months: Some(12),
        matches: None,
    };
    let c = compare_managers(&matches, &managers(), &query, today())
        .unwrap()
        .comparison;
    assert_eq!(c.manager1.goals_for, 2 * u64::from(u32::MAX));
}
