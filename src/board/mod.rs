//! Square grid of colored pieces.
//!
//! `x` is the row, `y` the column. Cells are stored row-major in a flat
//! vector; `None` marks an empty cell.

pub mod jump;

use rand::Rng;
use std::fmt;

use crate::error::{GameError, Result};

pub const MIN_SIZE: usize = 4;
pub const MAX_SIZE: usize = 20;
pub const COLOR_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceColor {
    A,
    B,
    C,
    D,
    E,
}

impl PieceColor {
    pub const ALL: [PieceColor; COLOR_COUNT] =
        [PieceColor::A, PieceColor::B, PieceColor::C, PieceColor::D, PieceColor::E];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'A'..='E' => Self::from_index(c as usize - 'A' as usize),
            _ => None,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

pub type Cell = Option<PieceColor>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

pub fn check_size(size: usize) -> Result<()> {
    if size % 2 != 0 || !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(GameError::InvalidSize(size));
    }
    Ok(())
}

impl Board {
    /// Fresh board: uniform random colors everywhere except the central 2x2
    /// block, which starts empty.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Result<Self> {
        check_size(size)?;
        let half = size / 2;
        let mut cells = Vec::with_capacity(size * size);
        for x in 0..size {
            for y in 0..size {
                let center = (x == half - 1 || x == half) && (y == half - 1 || y == half);
                if center {
                    cells.push(None);
                } else {
                    cells.push(PieceColor::from_index(rng.gen_range(0..COLOR_COUNT)));
                }
            }
        }
        Ok(Self { size, cells })
    }

    /// All-empty board, used when rebuilding from a snapshot.
    pub fn empty(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self { size, cells: vec![None; size * size] })
    }

    /// Build from rows of cells; every row must be `rows.len()` long.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self> {
        let size = rows.len();
        check_size(size)?;
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(GameError::InvalidSize(row.len()));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> Result<usize> {
        if !self.in_bounds(x, y) {
            return Err(GameError::OutOfBounds { x, y });
        }
        Ok(x * self.size + y)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        let i = self.idx(x, y)?;
        self.cells[i] = cell;
        Ok(())
    }

    pub fn at(&self, p: Pos) -> Result<Cell> {
        self.get(p.x, p.y)
    }

    pub fn put(&mut self, p: Pos, cell: Cell) -> Result<()> {
        self.set(p.x, p.y, cell)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Row-major iteration over every coordinate.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let n = self.size;
        (0..n).flat_map(move |x| (0..n).map(move |y| Pos::new(x, y)))
    }
}

/// Axis labels: 1-9 then A, B, ...
pub fn coord_label(i: usize) -> char {
    if i < 9 {
        (b'1' + i as u8) as char
    } else {
        (b'A' + (i - 9) as u8) as char
    }
}

pub fn parse_coord_label(c: char) -> Option<usize> {
    match c.to_ascii_uppercase() {
        d @ '1'..='9' => Some(d as usize - '1' as usize),
        l @ 'A'..='Z' => Some(l as usize - 'A' as usize + 9),
        _ => None,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for y in 0..self.size {
            write!(f, " {}", coord_label(y))?;
        }
        writeln!(f)?;
        for (x, row) in self.rows().enumerate() {
            write!(f, "{} ", coord_label(x))?;
            for cell in row {
                match cell {
                    Some(c) => write!(f, " {}", c)?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_odd_and_out_of_range_sizes() {
        let mut rng = SmallRng::seed_from_u64(1);
        for size in [0, 2, 3, 5, 21, 22] {
            assert!(matches!(Board::random(size, &mut rng), Err(GameError::InvalidSize(s)) if s == size));
        }
        for size in (4..=20).step_by(2) {
            assert!(Board::random(size, &mut rng).is_ok());
        }
    }

    #[test]
    fn center_block_empty_rest_filled() {
        let mut rng = SmallRng::seed_from_u64(7);
        let b = Board::random(6, &mut rng).unwrap();
        for p in b.positions() {
            let center = (2..=3).contains(&p.x) && (2..=3).contains(&p.y);
            assert_eq!(b.at(p).unwrap().is_none(), center, "cell {:?}", p);
        }
        assert_eq!(b.piece_count(), 32);
    }

    #[test]
    fn get_set_bounds() {
        let mut b = Board::empty(4).unwrap();
        b.set(3, 0, Some(PieceColor::C)).unwrap();
        assert_eq!(b.get(3, 0).unwrap(), Some(PieceColor::C));
        assert!(matches!(b.get(4, 0), Err(GameError::OutOfBounds { x: 4, y: 0 })));
        assert!(matches!(b.set(0, 9, None), Err(GameError::OutOfBounds { .. })));
    }

    #[test]
    fn coord_labels_roundtrip_past_nine() {
        assert_eq!(coord_label(0), '1');
        assert_eq!(coord_label(9), 'A');
        assert_eq!(parse_coord_label('a'), Some(9));
        assert_eq!(parse_coord_label('9'), Some(8));
        assert_eq!(parse_coord_label('0'), None);
    }
}
