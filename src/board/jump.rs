//! Single-jump rules: validation, execution and its exact inverse.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Board, PieceColor, Pos};
use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order used everywhere a direction is searched for.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// (row, column) delta of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

/// `n` steps from `p` in `dir`, or `None` when that leaves a `size`-wide grid.
pub fn step(p: Pos, dir: Direction, n: isize, size: usize) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let x = p.x.checked_add_signed(dx * n)?;
    let y = p.y.checked_add_signed(dy * n)?;
    (x < size && y < size).then_some(Pos::new(x, y))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Jump {
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
}

impl Jump {
    pub fn new(x: usize, y: usize, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    pub fn from_pos(p: Pos, direction: Direction) -> Self {
        Self::new(p.x, p.y, direction)
    }

    pub fn source(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    /// Captured and landing cells, if both are on a `size`-wide board.
    pub fn path(&self, size: usize) -> Option<(Pos, Pos)> {
        let src = self.source();
        let mid = step(src, self.direction, 1, size)?;
        let landing = step(src, self.direction, 2, size)?;
        Some((mid, landing))
    }

    fn invalid(&self) -> GameError {
        GameError::InvalidJump { x: self.x, y: self.y, direction: self.direction }
    }
}

/// Checks a jump against the current board and returns the color it would
/// capture. The moving piece itself is not inspected here.
pub fn validate(board: &Board, jump: &Jump) -> Result<PieceColor> {
    let (mid, landing) = jump.path(board.size()).ok_or_else(|| jump.invalid())?;
    let captured = board.at(mid)?.ok_or_else(|| jump.invalid())?;
    if board.at(landing)?.is_some() {
        return Err(jump.invalid());
    }
    Ok(captured)
}

/// Applies a jump that `validate` accepted on this exact board state.
pub fn execute(board: &mut Board, jump: &Jump) -> Result<()> {
    let (mid, landing) = jump.path(board.size()).ok_or_else(|| jump.invalid())?;
    let src = jump.source();
    let mover = board.at(src)?;
    board.put(landing, mover)?;
    board.put(mid, None)?;
    board.put(src, None)
}

/// Exact inverse of [`execute`].
pub fn undo(board: &mut Board, jump: &Jump, captured: PieceColor) -> Result<()> {
    let (mid, landing) = jump.path(board.size()).ok_or_else(|| jump.invalid())?;
    let src = jump.source();
    let mover = board.at(landing)?;
    board.put(src, mover)?;
    board.put(mid, Some(captured))?;
    board.put(landing, None)
}

pub fn has_any_continuation(board: &Board, p: Pos) -> bool {
    legal_directions(board, p).next().is_some()
}

/// Directions with a valid jump from `p`, in [`Direction::ALL`] order.
pub fn legal_directions(board: &Board, p: Pos) -> impl Iterator<Item = Direction> + '_ {
    Direction::ALL
        .into_iter()
        .filter(move |&d| validate(board, &Jump::from_pos(p, d)).is_ok())
}

/// A cell can start a chain when it holds a piece and has a legal jump.
pub fn can_start_from(board: &Board, p: Pos) -> bool {
    matches!(board.at(p), Ok(Some(_))) && has_any_continuation(board, p)
}
