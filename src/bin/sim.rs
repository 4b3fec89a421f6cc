use std::cell::Cell;
use std::rc::Rc;

use clap::Parser;
use naval_combat::prelude::*;
use naval_combat::DEFAULT_SHIP_LENGTHS;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

/// Play computer-vs-computer games and print one JSON summary per game.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: usize,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = naval_combat::DEFAULT_DIMENSION)]
    dimension: usize,
    /// Comma-separated ship lengths.
    #[arg(long, value_delimiter = ',')]
    ships: Vec<usize>,
    /// Log every state change.
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let ships = if cli.ships.is_empty() {
        DEFAULT_SHIP_LENGTHS.to_vec()
    } else {
        cli.ships
    };
    let config = GameConfig::new(cli.dimension, &ships)?;
    let rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    };

    let shots = Rc::new(Cell::new(0usize));
    let hits = Rc::new(Cell::new(0usize));
    let mut events = EventBus::new();
    {
        let (shots, hits) = (Rc::clone(&shots), Rc::clone(&hits));
        events.on(GAME_STATE_CHANGE, move |change: &GameStateChange| {
            // The game-over notification repeats the winning shot.
            if let (Some(shot), Phase::ShotReceived) = (change.shot, change.phase) {
                shots.set(shots.get() + 1);
                if shot.ship_hit {
                    hits.set(hits.get() + 1);
                }
            }
        });
    }
    if cli.verbose {
        attach_console_logger(&mut events);
    }

    let mut controller = GameController::with_rng(events, config, rng);
    controller.create_players("Computer 1", true, "Computer 2", true)?;
    for game in 0..cli.games {
        shots.set(0);
        hits.set(0);
        if game > 0 {
            controller.restart_game()?;
        }
        controller.place_random_ships(0)?;
        controller.start_game()?;
        loop {
            controller.prime_shot()?;
            if controller.make_shot(None)? {
                break;
            }
        }
        let winner = controller
            .winner()
            .map(|seat| controller.player(seat.index()).map(|p| p.name().to_string()))
            .transpose()?;
        let result = json!({
            "game": game,
            "winner": winner,
            "shots": shots.get(),
            "hits": hits.get(),
        });
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}
