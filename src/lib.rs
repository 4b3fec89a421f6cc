#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod common;
mod config;
pub mod events;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
pub mod prelude;
mod ship;

pub use board::*;
pub use common::*;
pub use config::*;
pub use events::EventBus;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{attach_console_logger, init_logging};
pub use player::*;
pub use ship::*;
