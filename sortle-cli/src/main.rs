//! Terminal frontend for the daily contest-problem ordering puzzle.

use std::fs;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use sortle_core::{Game, GameConfig};

mod cli;
mod logging;
mod play;
mod source;

use crate::cli::{CatalogArgs, Cli, Command, PlayArgs, TodayArgs};

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init_logging(cli.verbose) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = source::load_config(cli.config.as_deref())?;
    let location = cli
        .catalog
        .clone()
        .unwrap_or_else(|| config.catalog_url.clone());
    match &cli.command {
        Command::Today(args) => run_today(&cli, config, &location, args),
        Command::Play(args) => run_play(&cli, config, &location, args),
        Command::Catalog(args) => run_catalog(config, &location, args),
    }
}

fn build_game(cli: &Cli, config: GameConfig, location: &str) -> Result<Game> {
    let catalog = source::load_catalog(location, &config)?;
    let mut rng = rand::rng();
    let game = match cli.date {
        Some(day) => Game::new(catalog, config, day, now_ms(), &mut rng),
        None => Game::for_today(catalog, config, now_ms(), &mut rng),
    };
    game.context("could not pick a puzzle")
}

fn run_today(cli: &Cli, config: GameConfig, location: &str, args: &TodayArgs) -> Result<()> {
    let game = build_game(cli, config, location)?;
    let view = game.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!(
            "{}",
            play::format_board(&view, &game.config().display_prefix())
        );
    }
    if args.reveal {
        let puzzle = game.puzzle();
        println!(
            "\nanswer: {}{}",
            game.config().display_prefix(),
            puzzle.group_number
        );
        for (label, id) in puzzle.slot_labels.iter().zip(&puzzle.canonical_order) {
            let name = game.problem(id).map(|p| p.name.as_str()).unwrap_or("");
            println!("  [{:<2}] {:<12} {}", label, id, name);
        }
    }
    Ok(())
}

fn run_play(cli: &Cli, config: GameConfig, location: &str, args: &PlayArgs) -> Result<()> {
    let mut game = build_game(cli, config, location)?;
    let stdin = io::stdin();
    play::run(
        &mut game,
        stdin.lock(),
        io::stdout(),
        &mut rand::rng(),
        args.share_url.as_deref(),
        now_ms,
    )
}

fn run_catalog(config: GameConfig, location: &str, args: &CatalogArgs) -> Result<()> {
    let catalog = source::load_catalog(location, &config)?;
    fs::write(&args.out, catalog.to_json_pretty()?)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    tracing::info!(
        problems = catalog.len(),
        out = %args.out.display(),
        "catalog written"
    );
    Ok(())
}
