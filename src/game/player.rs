use serde::{Deserialize, Serialize};

use crate::board::{PieceColor, COLOR_COUNT};
use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Computer,
}

impl PlayerKind {
    pub fn code(self) -> u8 {
        match self {
            PlayerKind::Human => 0,
            PlayerKind::Computer => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PlayerKind::Human),
            1 => Some(PlayerKind::Computer),
            _ => None,
        }
    }
}

/// Names travel through the log as a bare token.
pub fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == ',') {
        return Err(GameError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: u8,
    pub kind: PlayerKind,
    pub name: String,
    pub score: u32,
    pub piece_counts: [u32; COLOR_COUNT],
}

impl Player {
    pub fn new(id: u8, kind: PlayerKind, name: &str) -> Result<Self> {
        check_name(name)?;
        Ok(Self { id, kind, name: name.to_string(), score: 0, piece_counts: [0; COLOR_COUNT] })
    }

    pub fn count(&self, color: PieceColor) -> u32 {
        self.piece_counts[color.index()]
    }

    /// Adds a captured piece without banking sets.
    pub fn credit(&mut self, color: PieceColor) {
        self.piece_counts[color.index()] += 1;
    }

    /// Converts every full set of colors into a point. Returns the number
    /// of sets banked.
    pub fn settle_sets(&mut self) -> u32 {
        let mut sets = 0;
        while self.piece_counts.iter().all(|&c| c >= 1) {
            for c in &mut self.piece_counts {
                *c -= 1;
            }
            self.score += 1;
            sets += 1;
        }
        sets
    }

    /// Live scoring path: credit then settle.
    pub fn record_capture(&mut self, color: PieceColor) -> u32 {
        self.credit(color);
        self.settle_sets()
    }

    /// Inverse of a [`record_capture`](Self::record_capture) that banked `sets`.
    pub fn revert_capture(&mut self, color: PieceColor, sets: u32) {
        for c in &mut self.piece_counts {
            *c += sets;
        }
        self.score -= sets;
        self.piece_counts[color.index()] -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PieceColor::*;

    fn p() -> Player {
        Player::new(1, PlayerKind::Human, "alice").unwrap()
    }

    #[test]
    fn one_of_each_color_banks_a_point() {
        let mut pl = p();
        for c in [C, A, E, B] {
            assert_eq!(pl.record_capture(c), 0);
        }
        assert_eq!(pl.record_capture(D), 1);
        assert_eq!(pl.score, 1);
        assert_eq!(pl.piece_counts, [0; 5]);
    }

    #[test]
    fn last_missing_color_completes_set() {
        let mut pl = p();
        pl.piece_counts = [1, 1, 1, 1, 0];
        pl.record_capture(E);
        assert_eq!(pl.score, 1);
        assert_eq!(pl.piece_counts, [0; 5]);
    }

    #[test]
    fn batched_credits_settle_in_a_loop() {
        let mut pl = p();
        for _ in 0..2 {
            for c in PieceColor::ALL {
                pl.credit(c);
            }
        }
        pl.credit(A);
        assert_eq!(pl.settle_sets(), 2);
        assert_eq!(pl.score, 2);
        assert_eq!(pl.piece_counts, [1, 0, 0, 0, 0]);
    }

    #[test]
    fn revert_undoes_a_banking_capture() {
        let mut pl = p();
        pl.piece_counts = [2, 1, 1, 1, 0];
        let before = pl.clone();
        let sets = pl.record_capture(E);
        pl.revert_capture(E, sets);
        assert_eq!(pl, before);
    }

    #[test]
    fn names_must_be_tokens() {
        assert!(Player::new(1, PlayerKind::Human, "two words").is_err());
        assert!(Player::new(1, PlayerKind::Human, "a,b").is_err());
        assert!(Player::new(1, PlayerKind::Human, "").is_err());
        assert!(Player::new(2, PlayerKind::Computer, "Computer").is_ok());
    }
}
