//! Balancer configuration store admin tool
//!
//! Usage:
//!   balancer-admin --db-path ./db/balancer.db show lb 123
//!   balancer-admin lbs --tenant tenant1
//!
//! Without `--db-path` the store location comes from `BALANCER_DB_PATH`,
//! falling back to `./db/balancer.db`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use balancer_admin::{run, Command};
use balancer_storage::{Storage, StorageConfig};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "balancer-admin")]
#[command(about = "Inspect and seed a balancer configuration store")]
struct Args {
    /// Path to the store file
    #[arg(short, long)]
    db_path: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = StorageConfig::from_env().context("Invalid storage environment")?;
    if let Some(path) = args.db_path {
        config.db_path = Some(path);
    }
    debug!(path = %config.db_path().display(), "Using store");

    let output = run(&Storage::new(config), &args.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
