use log::debug;

use crate::board::jump::{self, Direction, Jump};
use crate::board::{Board, Pos};
use crate::game::player::Player;
use crate::search::weights::WeightMatrix;
use crate::search::SearchParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub start: Pos,
    pub direction: Direction,
    pub value: u32,
    pub nodes: u64,
}

#[derive(Debug, Default)]
pub struct Searcher {
    pub(crate) nodes: u64,
    params: SearchParams,
}

impl Searcher {
    pub fn new(params: SearchParams) -> Self {
        Self { nodes: 0, params }
    }

    pub fn params(&self) -> SearchParams {
        self.params
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Best total captured weight reachable by chaining from `pos`, and the
    /// first direction of that chain. Each branch is simulated on `m` and
    /// undone before the next; `m` is unchanged on return. Recursion depth is
    /// bounded by the number of pieces, at most 200 on a 20x20 board.
    pub fn best_chain_value(&mut self, m: &mut WeightMatrix, pos: Pos) -> (u32, Option<Direction>) {
        self.nodes += 1;
        let mut best = (0, None);
        for d in Direction::ALL {
            let Some((mid, landing)) = Jump::from_pos(pos, d).path(m.size()) else { continue };
            let captured = m.get(mid);
            if captured == 0 || m.get(landing) != 0 {
                continue;
            }
            let mover = m.get(pos);
            m.set(landing, mover);
            m.set(pos, 0);
            m.set(mid, 0);
            let (rest, _) = self.best_chain_value(m, landing);
            m.set(pos, mover);
            m.set(mid, captured);
            m.set(landing, 0);
            let value = rest + captured;
            // strictly greater: ties keep the earlier direction
            if value > best.0 {
                best = (value, Some(d));
            }
        }
        best
    }

    /// Picks the start cell and first direction for `me`'s turn. `None`
    /// means no piece on the board has a legal jump.
    pub fn choose_start(&mut self, board: &Board, me: &Player, opponent: &Player) -> Option<SearchResult> {
        self.nodes = 0;
        let mut m = WeightMatrix::build(board, me, opponent);
        let mut best: Option<SearchResult> = None;
        for p in board.positions() {
            if m.get(p) == 0 {
                continue;
            }
            let (value, dir) = self.best_chain_value(&mut m, p);
            let Some(direction) = dir else { continue };
            if best.map_or(true, |b| value > b.value) {
                best = Some(SearchResult { start: p, direction, value, nodes: 0 });
            }
        }
        let best = best.filter(|b| b.value > 0).map(|b| SearchResult { nodes: self.nodes, ..b });
        match best {
            Some(b) => debug!(
                "{}: start ({}, {}) {} value {} after {} nodes",
                me.name, b.start.x, b.start.y, b.direction, b.value, b.nodes
            ),
            None => debug!("{}: no legal jump after {} nodes", me.name, self.nodes),
        }
        best
    }

    /// Direction for the next jump of a chain already at `pos`.
    pub fn choose_continuation(&mut self, board: &Board, me: &Player, opponent: &Player, pos: Pos) -> Option<Direction> {
        if !self.params.replan_each_step {
            return jump::legal_directions(board, pos).next();
        }
        let mut m = WeightMatrix::build(board, me, opponent);
        self.best_chain_value(&mut m, pos).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceColor;
    use crate::game::player::PlayerKind;

    fn board_from(lines: &[&str]) -> Board {
        let rows: Vec<Vec<_>> = lines
            .iter()
            .map(|l| l.chars().map(PieceColor::from_letter).collect())
            .collect();
        Board::from_rows(&rows).unwrap()
    }

    fn players() -> (Player, Player) {
        (
            Player::new(1, PlayerKind::Computer, "cpu").unwrap(),
            Player::new(2, PlayerKind::Human, "human").unwrap(),
        )
    }

    #[test]
    fn matrix_restored_after_search() {
        let b = board_from(&["AB C", " D E", "AB  ", "  CD"]);
        let (me, opp) = players();
        let mut m = WeightMatrix::build(&b, &me, &opp);
        let before = m.clone();
        let mut s = Searcher::default();
        for p in b.positions() {
            s.best_chain_value(&mut m, p);
            assert_eq!(m, before);
        }
    }

    #[test]
    fn prefers_longer_chain() {
        // (0,0) can take B then C (two jumps); (3,3) takes only one.
        let b = board_from(&["AB  ", "  C ", "    ", "  DE"]);
        let (me, opp) = players();
        let mut s = Searcher::default();
        let r = s.choose_start(&b, &me, &opp).unwrap();
        assert_eq!(r.start, Pos::new(0, 0));
        assert_eq!(r.direction, Direction::Right);
        assert_eq!(r.value, 4);
    }

    #[test]
    fn right_is_searched_inside_chains() {
        // Only continuation after the first jump is to the right.
        let b = board_from(&["A   ", "B   ", " C  ", "    "]);
        let (me, opp) = players();
        let mut m = WeightMatrix::build(&b, &me, &opp);
        let mut s = Searcher::default();
        let (v, d) = s.best_chain_value(&mut m, Pos::new(0, 0));
        assert_eq!(d, Some(Direction::Down));
        assert_eq!(v, 4);
    }

    #[test]
    fn no_legal_jump_forfeits() {
        let b = board_from(&["A  B", "    ", "    ", "C  D"]);
        let (me, opp) = players();
        let mut s = Searcher::default();
        assert!(s.choose_start(&b, &me, &opp).is_none());
    }

    #[test]
    fn search_is_deterministic() {
        let b = board_from(&["ABCD", "EA B", "C DE", "ABCD"]);
        let (me, opp) = players();
        let mut s = Searcher::default();
        let first = s.choose_start(&b, &me, &opp);
        for _ in 0..5 {
            assert_eq!(s.choose_start(&b, &me, &opp), first);
        }
    }
}
