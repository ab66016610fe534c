use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use lfc_history::config::{self, Config, arg_value};
use lfc_history::logging::init_tracing;
use lfc_history::managers::managers;
use lfc_history::query::{ComparisonQuery, HeadToHeadQuery, compare_managers, head_to_head};
use lfc_history::snapshot::SnapshotStore;

const USAGE: &str = "\
usage:
  lfc_history h2h <opponent> [--last-years N] [--from YYYY-MM-DD] [--to YYYY-MM-DD]
  lfc_history compare <manager1> <manager2> [--months N | --matches N]
  lfc_history seasons
options:
  --data-dir <dir>   snapshot directory (default: $LFC_DATA_DIR or .data)";

fn main() -> Result<()> {
    config::load_dotenv();
    init_tracing("warn")?;
    let cfg = Config::from_env();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let data_dir = arg_value(&args, "--data-dir")
        .map(PathBuf::from)
        .unwrap_or(cfg.data_dir);
    let store = SnapshotStore::new(data_dir);
    let today = Local::now().date_naive();

    let positional = positional_args(&args);
    match positional.as_slice() {
        ["h2h", opponent] => {
            let query = HeadToHeadQuery {
                opponent: opponent.to_string(),
                last_years: parse_num_arg(&args, "--last-years")?,
                from_date: parse_date_arg(&args, "--from")?,
                to_date: parse_date_arg(&args, "--to")?,
            };
            print_json(&head_to_head(store.matches()?, &query, today))
        }
        ["compare", manager1, manager2] => {
            let query = ComparisonQuery {
                manager1: manager1.to_string(),
                manager2: manager2.to_string(),
                months: parse_num_arg(&args, "--months")?,
                matches: parse_num_arg(&args, "--matches")?,
            };
            match compare_managers(store.matches()?, &managers(), &query, today) {
                Ok(comparison) => print_json(&comparison),
                Err(err) => print_json(&err),
            }
        }
        ["seasons"] => {
            for stats in store.season_stats()? {
                println!(
                    "{}  pos {:>2}  P{} W{} D{} L{}  {}-{} ({:+})  {} pts",
                    stats.season.id,
                    stats.league_position,
                    stats.played,
                    stats.won,
                    stats.drawn,
                    stats.lost,
                    stats.goals_for,
                    stats.goals_against,
                    stats.goal_difference,
                    stats.points
                );
            }
            Ok(())
        }
        _ => Err(anyhow!("{USAGE}")),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serialize result")?
    );
    Ok(())
}

/// Arguments that are neither flags nor flag values. Every flag takes a value.
fn positional_args(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = !arg.contains('=');
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

fn parse_num_arg(args: &[String], flag: &str) -> Result<Option<u32>> {
    arg_value(args, flag)
        .map(|raw| {
            raw.parse::<u32>()
                .with_context(|| format!("{flag} expects a whole number, got {raw}"))
        })
        .transpose()
}

fn parse_date_arg(args: &[String], flag: &str) -> Result<Option<NaiveDate>> {
    arg_value(args, flag)
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .with_context(|| format!("{flag} expects YYYY-MM-DD, got {raw}"))
        })
        .transpose()
}
