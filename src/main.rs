mod commands;
mod config;
mod error;
mod services;
mod state;
mod storage;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::{Op, SessionLine, apply, tokenize};
use crate::config::AppConfig;
use crate::error::CliError;
use crate::services::persistence::spawn_save_task;
use crate::state::Session;

#[derive(Parser, Debug)]
#[command(name = "coverpage", about = "Free-form cover page editor with PDF export")]
struct Cli {
    /// Directory for the key-value store files.
    #[arg(long, env = "COVERPAGE_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Root for site-relative image paths.
    #[arg(long, env = "COVERPAGE_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// Directory for exported PDFs.
    #[arg(long, env = "COVERPAGE_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read one operation per line from stdin; saves are debounced.
    Session,
    #[command(flatten)]
    Op(Op),
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = dotenv
        && !e.not_found()
    {
        warn!(error = %e, ".env could not be loaded");
    }

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.state_dir {
        config.state_dir = dir;
    }
    if let Some(dir) = cli.assets_dir {
        config.assets_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let result = match cli.command {
        Command::Session => run_session(config).await,
        Command::Op(op) => run_once(config, op).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run_once(config: AppConfig, op: Op) -> Result<(), CliError> {
    let mut session = Session::open(config)?;
    let output = apply(&mut session, op).await;
    // Persist whatever changed even if the operation itself failed late.
    if session.is_dirty() {
        session.save()?;
    }
    print_json(&output?)
}

async fn run_session(config: AppConfig) -> Result<(), CliError> {
    let debounce_ms = config.save_debounce_ms;
    let session = Session::open(config)?.into_shared();
    let saver = spawn_save_task(session.clone(), debounce_ms);
    info!(debounce_ms, "session started; reading operations from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words = match tokenize(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                warn!(error = %e, "unparseable line");
                continue;
            }
        };
        let parsed = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "unknown operation");
                continue;
            }
        };

        let mut guard = session.lock().await;
        let output = apply(&mut guard, parsed.op).await;
        let dirty = guard.is_dirty();
        drop(guard);
        if dirty {
            saver.touch();
        }
        match output {
            Ok(value) => print_json(&value)?,
            Err(e) => warn!(error = %e, "operation failed"),
        }
    }

    saver.shutdown().await?;
    info!("session closed");
    Ok(())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
