//! Commonly used types and utilities for ease of import.

pub use crate::{
    Coordinate, EventBus, GameConfig, GameController, GameError, GameStateChange, Orientation,
    Phase, Seat, GAME_STATE_CHANGE,
};

#[cfg(feature = "std")]
pub use crate::{attach_console_logger, init_logging};
