#![cfg(feature = "std")]

use std::env;
use log::{self, info, LevelFilter, Metadata, Record};

use crate::events::EventBus;
use crate::game::{GameStateChange, GAME_STATE_CHANGE};

/// Writes records to stderr so that stdout stays free for program output.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Initialize logging with a level taken from the `NAVAL_COMBAT_LOG` environment variable.
/// Defaults to `info` if the variable is not set or invalid.
pub fn init_logging() {
    let level = env::var("NAVAL_COMBAT_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

/// Subscribe a handler that logs every game state change at `info` as JSON.
pub fn attach_console_logger(events: &mut EventBus<GameStateChange>) {
    events.on(GAME_STATE_CHANGE, |change: &GameStateChange| {
        match serde_json::to_string(change) {
            Ok(json) => info!("{} ({}): {}", GAME_STATE_CHANGE, change.phase, json),
            Err(e) => info!("{} ({}): payload not serializable: {}", GAME_STATE_CHANGE, change.phase, e),
        }
    });
}
