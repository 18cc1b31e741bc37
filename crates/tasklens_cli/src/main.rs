//! Command-line entry point.
//!
//! # Responsibility
//! - Probe `tasklens_core` linkage when run without arguments.
//! - Run search or analytics against a JSON snapshot file and print JSON.
//!
//! Usage:
//! - `tasklens`
//! - `tasklens search <snapshot.json> <query>`
//! - `tasklens suggest <snapshot.json> <query>`
//! - `tasklens report <snapshot.json> [timeframe_days]`
//!
//! Set `TASKLENS_LOG_DIR` to an absolute path to enable file logs.

use chrono::Utc;
use std::process::ExitCode;
use tasklens_core::{InsightService, MemoryKeyValueRepository, Snapshot};

const DEFAULT_TIMEFRAME_DAYS: u32 = 30;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("tasklens_core ping={}", tasklens_core::ping());
        println!("tasklens_core version={}", tasklens_core::core_version());
        return ExitCode::SUCCESS;
    }

    if let Ok(log_dir) = std::env::var("TASKLENS_LOG_DIR") {
        if let Err(err) = tasklens_core::init_logging(tasklens_core::default_log_level(), &log_dir)
        {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<String, String> {
    let (command, path) = match args {
        [command, path, ..] => (command.as_str(), path.as_str()),
        _ => return Err(usage()),
    };
    let raw = std::fs::read_to_string(path).map_err(|err| format!("cannot read `{path}`: {err}"))?;
    let snapshot = Snapshot::from_json(&raw).map_err(|err| err.to_string())?;
    let service = InsightService::new(snapshot, MemoryKeyValueRepository::default());

    let rendered = match command {
        "search" => {
            let query = args.get(2).ok_or_else(usage)?;
            serde_json::to_string_pretty(&service.search(query))
        }
        "suggest" => {
            let query = args.get(2).ok_or_else(usage)?;
            serde_json::to_string_pretty(&service.suggest(query))
        }
        "report" => {
            let timeframe_days = parse_timeframe(args.get(2).map(String::as_str))?;
            serde_json::to_string_pretty(&service.report(timeframe_days, Utc::now()))
        }
        _ => return Err(usage()),
    };
    rendered.map_err(|err| format!("cannot encode output: {err}"))
}

fn parse_timeframe(value: Option<&str>) -> Result<u32, String> {
    match value {
        Some(value) => value
            .parse::<u32>()
            .map_err(|err| format!("invalid timeframe `{value}`: {err}")),
        None => Ok(DEFAULT_TIMEFRAME_DAYS),
    }
}

fn usage() -> String {
    "usage: tasklens [search|suggest <snapshot.json> <query> | report <snapshot.json> [days]]"
        .to_string()
}
