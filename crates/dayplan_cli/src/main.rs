//! Terminal front end for the day planner core.
//!
//! # Responsibility
//! - Own the interactive loop: render slot rows, read commands, route
//!   gestures into the planner.
//! - Keep all confirmation and presentation concerns out of the core.
//!
//! # Invariants
//! - The planner ticks on every interaction, so day rollover and temporal
//!   classes stay fresh without a timer thread; the process stays
//!   single-threaded.

use dayplan_core::db::open_db;
use dayplan_core::{
    core_version, default_log_level, init_logging, Clock, HourRange, Planner, SlotEvent, SlotRow,
    SlotState, SlotRepository, SqliteSlotRepository, SystemClock, TemporalClass, ViewEffect,
};
use log::info;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const DEFAULT_DB_FILE: &str = "dayplan.sqlite3";

#[derive(Debug)]
struct CliOptions {
    db_path: String,
    range: HourRange,
    log_dir: Option<String>,
    once: bool,
}

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("{}", usage());
            return ExitCode::from(2);
        }
    };

    if let Some(log_dir) = &options.log_dir {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let conn = match open_db(&options.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("error: cannot open `{}`: {err}", options.db_path);
            return ExitCode::FAILURE;
        }
    };

    let repo = SqliteSlotRepository::new(&conn);
    let mut planner = Planner::new(repo, SystemClock, options.range);
    if let Err(err) = planner.init() {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    info!(
        "event=cli_start module=cli status=ok db={} once={}",
        options.db_path, options.once
    );

    render(&planner);
    if options.once {
        return ExitCode::SUCCESS;
    }

    run_loop(&mut planner)
}

/// Parses flags; `Ok(None)` means help/version already handled.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<CliOptions>, String> {
    let mut db_path = DEFAULT_DB_FILE.to_string();
    let mut start_hour = HourRange::default().start_hour();
    let mut end_hour = HourRange::default().end_hour();
    let mut log_dir = None;
    let mut once = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => db_path = required_value(&arg, args.next())?,
            "--from" => start_hour = parse_hour_arg(&arg, args.next())?,
            "--to" => end_hour = parse_hour_arg(&arg, args.next())?,
            "--log-dir" => log_dir = Some(required_value(&arg, args.next())?),
            "--once" => once = true,
            "--help" | "-h" => {
                println!("{}", usage());
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("dayplan {}", core_version());
                return Ok(None);
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    let range = HourRange::new(start_hour, end_hour).map_err(|err| err.to_string())?;
    Ok(Some(CliOptions {
        db_path,
        range,
        log_dir,
        once,
    }))
}

fn required_value(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("`{flag}` requires a value"))
}

fn parse_hour_arg(flag: &str, value: Option<String>) -> Result<u8, String> {
    required_value(flag, value)?
        .parse::<u8>()
        .map_err(|_| format!("`{flag}` expects an hour between 0 and 23"))
}

fn usage() -> String {
    [
        "usage: dayplan [--db <path>] [--from <hour>] [--to <hour>] [--log-dir <dir>] [--once]",
        "",
        "  --db <path>      sqlite database file (default: dayplan.sqlite3)",
        "  --from <hour>    first displayed hour, 24h form (default: 8)",
        "  --to <hour>      last displayed hour, 24h form (default: 20)",
        "  --log-dir <dir>  absolute directory for rolling log files",
        "  --once           render the current day once and exit",
    ]
    .join("\n")
}

fn run_loop<R: SlotRepository, C: Clock>(planner: &mut Planner<R, C>) -> ExitCode {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("dayplan> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return ExitCode::SUCCESS,
        };

        // Minute-level staleness is re-derived on every interaction.
        if let Err(err) = planner.tick() {
            eprintln!("error: {err}");
        }

        match dispatch(planner, line.trim(), &mut lines) {
            Ok(true) => return ExitCode::SUCCESS,
            Ok(false) => {}
            Err(message) => eprintln!("error: {message}"),
        }
    }
}

/// Executes one command line. Returns `Ok(true)` to quit.
fn dispatch<R: SlotRepository, C: Clock>(
    planner: &mut Planner<R, C>,
    line: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<bool, String> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "show" => render(planner),
        "edit" => {
            let hour = parse_hour(rest)?;
            planner
                .handle(hour, SlotEvent::AddEdit)
                .map_err(|err| err.to_string())?;

            let current = planner
                .store()
                .task(hour)
                .map(|record| record.text.clone())
                .unwrap_or_default();
            print!("task ({}, empty deletes) [{current}]: ", hour_label(planner, hour));
            let _ = io::stdout().flush();

            let text = match lines.next() {
                Some(Ok(text)) => text,
                _ => String::new(),
            };
            planner
                .handle(hour, SlotEvent::Save(text))
                .map_err(|err| err.to_string())?;
            render(planner);
        }
        "done" => {
            let hour = parse_hour(rest)?;
            match planner
                .handle(hour, SlotEvent::ToggleComplete)
                .map_err(|err| err.to_string())?
            {
                ViewEffect::NoChange => println!("no task at {}", hour_label(planner, hour)),
                _ => render(planner),
            }
        }
        "rm" => {
            let hour = parse_hour(rest)?;
            match planner
                .handle(hour, SlotEvent::Delete)
                .map_err(|err| err.to_string())?
            {
                ViewEffect::NoChange => println!("no task at {}", hour_label(planner, hour)),
                _ => render(planner),
            }
        }
        "clear" => {
            print!("clear all tasks? [y/N]: ");
            let _ = io::stdout().flush();
            let answer = match lines.next() {
                Some(Ok(answer)) => answer,
                _ => String::new(),
            };
            if answer.trim().eq_ignore_ascii_case("y") {
                planner.clear_all().map_err(|err| err.to_string())?;
                render(planner);
            }
        }
        "help" => println!("commands: show | edit <hour> | done <hour> | rm <hour> | clear | help | quit"),
        "quit" | "exit" => return Ok(true),
        other => return Err(format!("unknown command `{other}`; try `help`")),
    }

    Ok(false)
}

fn parse_hour(value: &str) -> Result<u8, String> {
    value
        .parse::<u8>()
        .map_err(|_| "expected an hour between 0 and 23".to_string())
}

fn hour_label<R: SlotRepository, C: Clock>(planner: &Planner<R, C>, hour: u8) -> String {
    planner
        .row(hour)
        .map(|row| row.label.clone())
        .unwrap_or_else(|| format!("hour {hour}"))
}

fn render<R: SlotRepository, C: Clock>(planner: &Planner<R, C>) {
    println!();
    println!("  {}", planner.today_header());
    println!();
    for row in planner.rows() {
        println!("{}", format_row(row));
    }
    println!();
}

fn format_row(row: &SlotRow) -> String {
    let marker = match row.temporal {
        TemporalClass::Past => '.',
        TemporalClass::Present => '>',
        TemporalClass::Future => ' ',
    };
    let checkbox = match (&row.text, row.completed) {
        (Some(_), true) => "[x]",
        (Some(_), false) => "[ ]",
        (None, _) => "   ",
    };
    let text = match (&row.state, &row.text) {
        (SlotState::Editing, _) => "(editing)",
        (_, Some(text)) => text.as_str(),
        (_, None) => "",
    };
    format!(" {marker} {:>5}  {checkbox} {text}", row.label)
}
