use thiserror::Error;

use crate::board::jump::Direction;
use crate::game::chain::ChainPhase;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("board size {0} must be even and within 4..=20")]
    InvalidSize(usize),
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("illegal jump from ({x}, {y}) {direction}")]
    InvalidJump { x: usize, y: usize, direction: Direction },
    #[error("no piece at ({x}, {y})")]
    NoPieceHere { x: usize, y: usize },
    #[error("piece at ({x}, {y}) has no legal jump")]
    NoMoveFromHere { x: usize, y: usize },
    #[error("player name {0:?} must be a single token without whitespace or commas")]
    InvalidName(String),
    #[error("action not accepted while the turn is {0:?}")]
    WrongPhase(ChainPhase),
    #[error("chain must continue while a jump is available")]
    ContinuationRequired,
    #[error("no jump to undo")]
    NothingToUndo,
    #[error("game is over")]
    GameOver,
    #[error("corrupt log at line {line}: {reason}")]
    CorruptLog { line: usize, reason: String },
    #[error("log write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
