use crate::board::{Board, Pos};
use crate::game::player::Player;

/// Static per-cell value for the computer's search. Empty cells weigh 0,
/// pieces 1, doubled when the opponent already holds that color and doubled
/// again when `me` holds none of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightMatrix {
    size: usize,
    w: Vec<u32>,
}

impl WeightMatrix {
    pub fn build(board: &Board, me: &Player, opponent: &Player) -> Self {
        let w = board
            .cells()
            .iter()
            .map(|cell| match cell {
                None => 0,
                Some(color) => {
                    let mut v = 1;
                    if opponent.count(*color) > 0 {
                        v *= 2;
                    }
                    if me.count(*color) == 0 {
                        v *= 2;
                    }
                    v
                }
            })
            .collect();
        Self { size: board.size(), w }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, p: Pos) -> u32 {
        self.w[p.x * self.size + p.y]
    }

    #[inline]
    pub fn set(&mut self, p: Pos, v: u32) {
        self.w[p.x * self.size + p.y] = v;
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let n = self.size;
        (0..n).flat_map(move |x| (0..n).map(move |y| Pos::new(x, y)))
    }
}
