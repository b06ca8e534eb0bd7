#[macro_use]
mod logger;
mod clock;
mod error;
mod game;
mod input;
mod snake;
mod state;
mod term;

use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use crate::error::ErrorType;

pub type TermInt = u16;
pub type TermCoords = (u16, u16);
/// Pixel position on the 600x600 playfield
pub type Coords = (i32, i32);

#[derive(Parser)]
#[command(name = "snake_lite", about = "Snake Lite, played in the terminal")]
struct Args {
    /// Seed for food placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Append a timestamped event log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Start playing right away, without the instructions screen
    #[arg(long)]
    skip_intro: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logger::init_logger(args.log_file.as_deref()) {
        eprintln!("Cannot open log file: {}", e);
        exit(1);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log!("Snake Lite starting with seed {}", seed);

    let mut game = match game::SnakeGame::new(seed) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    // The terminal is restored before anything is reported
    let result = game.run(args.skip_intro);
    let restored = game.shutdown();

    if let Err(e) = result.and(restored) {
        match e.kind() {
            ErrorType::TerminalTooSmall { .. } => eprintln!("{}", e.kind()),
            _ => eprintln!("{}", e),
        }
        exit(1);
    }
}
