//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use sortle_core::DaySeed;

#[derive(Parser)]
#[command(
    name = "sortle",
    version,
    about = "Daily puzzle: put one contest's problems back in order"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Catalog location: a JSON file path or an http(s) URL.
    #[arg(long, env = "SORTLE_CATALOG", value_name = "PATH|URL", global = true)]
    pub catalog: Option<String>,

    /// JSON file overriding the game configuration.
    #[arg(long, env = "SORTLE_CONFIG", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Replay the puzzle of another day.
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_day, global = true)]
    pub date: Option<DaySeed>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the puzzle of the day.
    Today(TodayArgs),
    /// Play the puzzle of the day interactively.
    Play(PlayArgs),
    /// Download the catalog, keep the configured contest series and save it.
    Catalog(CatalogArgs),
}

#[derive(Args)]
pub struct TodayArgs {
    /// Also print the correct order.
    #[arg(long)]
    pub reveal: bool,

    /// Print the board snapshot as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PlayArgs {
    /// URL appended to the share text.
    #[arg(long, env = "SORTLE_SHARE_URL")]
    pub share_url: Option<String>,
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Output file for the filtered catalog.
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,
}

fn parse_day(s: &str) -> Result<DaySeed, String> {
    DaySeed::parse(s).ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", s))
}
