use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use sandbot::bot::Bot;
use sandbot::config::BotConfig;
use sandbot::engine::uci::UciEngine;
use sandbot::event::MoveEvent;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pace and sandbag moves from an external UCI engine", long_about = None)]
struct Args {
    /// Path to the JSON config file (re-read before every decision)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Engine binary; overrides the config's engine_path
    #[arg(long)]
    engine: Option<String>,

    /// Seed for movetime jitter (omit for entropy)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BotConfig::load_or_default(path),
        None => BotConfig::default(),
    };
    let engine_path = args.engine.as_deref().unwrap_or(&config.engine_path);
    let engine = UciEngine::spawn(engine_path)?;

    let mut bot = match args.config {
        Some(path) => Bot::with_config_path(engine, path),
        None => Bot::new(engine, config),
    };
    if let Some(seed) = args.seed {
        bot.seed_scheduler(seed);
    }

    // Move events arrive as JSON lines on stdin; chosen moves leave as JSON
    // lines on stdout. Everything else is on the far side of this pipe.
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(s) => s.trim().to_string(),
            Err(_) => break,
        };
        if line.is_empty() {
            continue;
        }
        let event: MoveEvent = match serde_json::from_str(&line) {
            Ok(ev) => ev,
            Err(e) => {
                log::warn!("bad move event: {}", e);
                continue;
            }
        };
        if let Some(chosen) = bot.on_move_event(&event) {
            writeln!(stdout, "{}", serde_json::to_string(&chosen)?)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
