//! PagedKV Command Shell
//!
//! Reads commands from stdin (or a file) and prints results to stdout.
//! Diagnostics go to stderr.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pagedkv::{Engine, MapConfig, Shell, ShellConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// PagedKV shell
#[derive(Parser, Debug)]
#[command(name = "pagedkv")]
#[command(about = "Paged integer key-value store driven by text commands")]
#[command(version)]
struct Args {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Initialize a map before reading input
    #[arg(long, num_args = 2, value_names = ["PAGE_SIZE", "NUMBER_OF_PAGES"])]
    init: Option<Vec<u32>>,

    /// Exit on the first failed command
    #[arg(long)]
    stop_on_error: bool,
}

fn main() {
    // Logs on stderr so stdout carries only command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut config = ShellConfig::builder().stop_on_error(args.stop_on_error);
    if let Some([page_size, number_of_pages]) = args.init.as_deref() {
        config = config.preinit(MapConfig::new(*page_size, *number_of_pages));
    }

    let shell = match Shell::new(Arc::new(Engine::new()), config.build()) {
        Ok(shell) => shell,
        Err(e) => {
            tracing::error!("Failed to initialize map: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &args.input {
        Some(path) => match File::open(path) {
            Ok(file) => shell.run(BufReader::new(file), &mut out),
            Err(e) => {
                tracing::error!("Failed to open {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => shell.run(io::stdin().lock(), &mut out),
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                commands = summary.commands,
                errors = summary.errors,
                "input exhausted"
            );
            if summary.stopped_early {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("Shell error: {}", e);
            std::process::exit(1);
        }
    }
}
