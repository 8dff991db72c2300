//! One player's turn: a chain of jumps by a single piece.
//!
//! The controller owns only the chain in progress. Board and player are
//! passed in by the turn driver on every call so that the turn owner is
//! always explicit.

use log::debug;

use crate::board::jump::{self, Direction, Jump};
use crate::board::{Board, PieceColor, Pos};
use crate::config::ContinuationRule;
use crate::error::{GameError, Result};
use crate::game::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainPhase {
    SelectingStart,
    Jumping,
    Done,
}

/// A committed jump together with what is needed to reverse it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub jump: Jump,
    pub captured: PieceColor,
    pub sets: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JumpOutcome {
    pub captured: PieceColor,
    pub landing: Pos,
    pub sets: u32,
    /// True while the chain still has a legal jump from `landing`.
    pub can_continue: bool,
}

#[derive(Clone, Debug)]
pub struct ChainController {
    phase: ChainPhase,
    position: Option<Pos>,
    steps: Vec<Step>,
    undo_armed: bool,
    rule: ContinuationRule,
}

impl ChainController {
    pub fn new(rule: ContinuationRule) -> Self {
        Self { phase: ChainPhase::SelectingStart, position: None, steps: Vec::new(), undo_armed: false, rule }
    }

    pub fn phase(&self) -> ChainPhase {
        self.phase
    }

    pub fn position(&self) -> Option<Pos> {
        self.position
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn jumps(&self) -> impl Iterator<Item = Jump> + '_ {
        self.steps.iter().map(|s| s.jump)
    }

    /// Clears the finished chain and returns its steps.
    pub fn take(&mut self) -> Vec<Step> {
        self.phase = ChainPhase::SelectingStart;
        self.position = None;
        self.undo_armed = false;
        std::mem::take(&mut self.steps)
    }

    fn expect_phase(&self, phase: ChainPhase) -> Result<()> {
        if self.phase != phase {
            return Err(GameError::WrongPhase(self.phase));
        }
        Ok(())
    }

    pub fn select_start(&mut self, board: &Board, start: Pos) -> Result<()> {
        self.expect_phase(ChainPhase::SelectingStart)?;
        if board.at(start)?.is_none() {
            return Err(GameError::NoPieceHere { x: start.x, y: start.y });
        }
        if !jump::has_any_continuation(board, start) {
            return Err(GameError::NoMoveFromHere { x: start.x, y: start.y });
        }
        self.position = Some(start);
        self.phase = ChainPhase::Jumping;
        Ok(())
    }

    /// Validates and commits one jump from the current position. An illegal
    /// direction leaves the chain untouched so the caller can ask again.
    pub fn jump(&mut self, board: &mut Board, player: &mut Player, direction: Direction) -> Result<JumpOutcome> {
        self.expect_phase(ChainPhase::Jumping)?;
        let pos = self.position.ok_or(GameError::WrongPhase(self.phase))?;
        let j = Jump::from_pos(pos, direction);
        let captured = jump::validate(board, &j)?;
        jump::execute(board, &j)?;
        let sets = player.record_capture(captured);
        let (_, landing) = j.path(board.size()).ok_or(GameError::InvalidJump { x: j.x, y: j.y, direction })?;
        self.steps.push(Step { jump: j, captured, sets });
        self.position = Some(landing);
        self.undo_armed = true;
        let can_continue = jump::has_any_continuation(board, landing);
        if !can_continue {
            self.phase = ChainPhase::Done;
        }
        debug!(
            "{} jumps ({}, {}) {} capturing {}{}",
            player.name,
            pos.x,
            pos.y,
            direction,
            captured,
            if can_continue { "" } else { ", chain ends" }
        );
        Ok(JumpOutcome { captured, landing, sets, can_continue })
    }

    /// Ends a chain that could still continue; only under the optional rule
    /// and only after at least one jump.
    pub fn stop(&mut self) -> Result<()> {
        self.expect_phase(ChainPhase::Jumping)?;
        if self.rule == ContinuationRule::Forced {
            return Err(GameError::ContinuationRequired);
        }
        if self.steps.is_empty() {
            return Err(GameError::WrongPhase(self.phase));
        }
        self.phase = ChainPhase::Done;
        Ok(())
    }

    /// Reverts the most recent jump of this chain. One level only: a second
    /// undo needs another jump in between.
    pub fn undo(&mut self, board: &mut Board, player: &mut Player) -> Result<Step> {
        if self.phase == ChainPhase::SelectingStart || !self.undo_armed {
            return Err(GameError::NothingToUndo);
        }
        let step = self.steps.pop().ok_or(GameError::NothingToUndo)?;
        jump::undo(board, &step.jump, step.captured)?;
        player.revert_capture(step.captured, step.sets);
        self.position = Some(step.jump.source());
        self.phase = ChainPhase::Jumping;
        self.undo_armed = false;
        Ok(step)
    }

    /// Abandons a turn before any jump is committed.
    pub fn decline(&mut self) -> Result<()> {
        if self.phase == ChainPhase::Done || !self.steps.is_empty() {
            return Err(GameError::WrongPhase(self.phase));
        }
        self.phase = ChainPhase::SelectingStart;
        self.position = None;
        Ok(())
    }
}
