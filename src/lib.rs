// Grid capture game: jump rules, turn chains, set scoring, search and replay logs
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod replay;
pub mod search;
pub mod selfplay;

pub use error::{GameError, Result};
