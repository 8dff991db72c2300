pub mod chain;
pub mod player;
pub mod session;

pub use chain::{ChainController, ChainPhase, JumpOutcome, Step};
pub use player::{Player, PlayerKind};
pub use session::{GameSession, GameSummary, TurnOutcome};

use crate::board::jump::{self, Direction, Jump};
use crate::board::Board;
use crate::config::MoveAvailability;

/// Whether any piece on the board can still start a chain, probed the way
/// `rule` asks.
pub fn any_move_available(board: &Board, rule: MoveAvailability) -> bool {
    board.positions().any(|p| match rule {
        MoveAvailability::AllDirections => jump::can_start_from(board, p),
        MoveAvailability::UpOnly => {
            matches!(board.at(p), Ok(Some(_))) && jump::validate(board, &Jump::from_pos(p, Direction::Up)).is_ok()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceColor;

    #[test]
    fn up_only_probe_misses_sideways_moves() {
        let mut b = Board::empty(4).unwrap();
        b.set(1, 0, Some(PieceColor::A)).unwrap();
        b.set(1, 1, Some(PieceColor::B)).unwrap();
        assert!(any_move_available(&b, MoveAvailability::AllDirections));
        assert!(!any_move_available(&b, MoveAvailability::UpOnly));
        // C can now jump up over A
        b.set(2, 0, Some(PieceColor::C)).unwrap();
        assert!(any_move_available(&b, MoveAvailability::UpOnly));
    }
}
