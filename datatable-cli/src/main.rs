//! Command-line driver for the table engine.
//!
//! Loads a JSON view file and executes commands read from a script file or,
//! when none is given, from standard input.

mod command;
mod error;
mod loader;
mod paths;
mod render;
mod row;
mod session;
mod settings;
mod view;

use std::fs;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::command::Command;
use crate::error::CliError;
use crate::session::EventLog;
use crate::session::Flow;
use crate::session::Session;
use crate::settings::CliSettings;
use crate::view::ViewFile;

const USAGE: &str = "usage: datatable-cli <view.json> [commands.txt]";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(view_path) = args.first() else {
        return Err(CliError::usage(USAGE));
    };

    let settings = CliSettings::load()?;
    init_logging(settings.level()?)?;

    let events = EventLog::default();
    let table = ViewFile::load(Path::new(view_path))?.build(&settings.table, &events)?;
    let mut session = Session::new(table, events);

    let mut stdout = io::stdout();
    session.execute(Command::Show, &mut stdout).await?;

    match args.get(1) {
        Some(script) => run_script(&mut session, Path::new(script), &mut stdout).await,
        None => run_interactive(&mut session, &mut stdout).await,
    }
}

/// Runs every line of a script; the first failing command ends the run.
async fn run_script(session: &mut Session, path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let script = fs::read_to_string(path)?;
    for line in script.lines() {
        let Some(command) = Command::parse(line)? else {
            continue;
        };
        writeln!(out, "$ {}", line.trim())?;
        if session.execute(command, out).await? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

/// Reads commands from stdin until `quit` or end of input. Command errors
/// are reported and the session continues.
async fn run_interactive(session: &mut Session, out: &mut impl Write) -> Result<(), CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(out, "datatable> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };
        match session.execute(command, out).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                log::warn!("Command failed: {}", e);
                writeln!(out, "error: {}", e)?;
            }
        }
    }
    Ok(())
}

/// Logs to `latest.log` in the cache directory, rotating the previous log.
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    paths::rotate_logs();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    WriteLogger::init(level, Config::default(), File::create(&path)?)?;
    log::info!("Logging to {}", path.display());
    Ok(())
}
