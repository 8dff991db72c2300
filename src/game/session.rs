//! Turn driver: owns the board, both players, the chain in progress and the
//! game's log. The turn owner is an index into `players`; the opponent is
//! always the other slot.

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::Path;

use crate::board::jump::Direction;
use crate::board::{Board, PieceColor, Pos, COLOR_COUNT};
use crate::config::{GameConfig, RuleSet};
use crate::error::{GameError, Result};
use crate::game::chain::{ChainController, ChainPhase, JumpOutcome, Step};
use crate::game::player::{Player, PlayerKind};
use crate::game::any_move_available;
use crate::replay::{MoveRecord, ReplayLog, ReplayWriter};
use crate::search::Searcher;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Committed { jumps: usize, sets: u32 },
    Declined,
    /// The computer found no legal jump anywhere.
    Forfeit,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerSummary {
    pub id: u8,
    pub name: String,
    pub kind: PlayerKind,
    pub score: u32,
    pub piece_counts: [u32; COLOR_COUNT],
}

#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub size: usize,
    pub moves: usize,
    pub over: bool,
    /// `None` on a tie.
    pub winner: Option<u8>,
    pub players: Vec<PlayerSummary>,
    pub final_board: Vec<String>,
}

pub struct GameSession {
    board: Board,
    players: [Player; 2],
    turn: usize,
    rules: RuleSet,
    chain: ChainController,
    log: ReplayLog,
    writer: Option<ReplayWriter>,
    passes: u8,
    over: bool,
}

impl GameSession {
    pub fn new(board: Board, players: [Player; 2], rules: RuleSet) -> Self {
        let log = ReplayLog::new(&board, &players);
        let mut s = Self {
            board,
            players,
            turn: 0,
            rules,
            chain: ChainController::new(rules.continuation),
            log,
            writer: None,
            passes: 0,
            over: false,
        };
        s.refresh_over();
        info!(
            "new game on {0}x{0}: {1} vs {2}",
            s.board.size(),
            s.players[0].name,
            s.players[1].name
        );
        s
    }

    pub fn from_config(cfg: &GameConfig) -> Result<Self> {
        let mut rng = match cfg.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::from_config_with_rng(cfg, &mut rng)
    }

    pub fn from_config_with_rng<R: Rng>(cfg: &GameConfig, rng: &mut R) -> Result<Self> {
        let board = Board::random(cfg.size, rng)?;
        let players = [
            Player::new(1, cfg.players[0].kind, &cfg.players[0].name)?,
            Player::new(2, cfg.players[1].kind, &cfg.players[1].name)?,
        ];
        Ok(Self::new(board, players, cfg.rules))
    }

    /// Starts durable logging to `path`; the header is written immediately.
    pub fn log_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut w = ReplayWriter::create(path, &self.log)?;
        w.append(self.log.moves())?;
        self.writer = Some(w);
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current(&self) -> &Player {
        &self.players[self.turn]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[1 - self.turn]
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn phase(&self) -> ChainPhase {
        self.chain.phase()
    }

    pub fn chain_position(&self) -> Option<Pos> {
        self.chain.position()
    }

    pub fn log(&self) -> &ReplayLog {
        &self.log
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    fn refresh_over(&mut self) {
        if !self.over && !any_move_available(&self.board, self.rules.availability) {
            info!("no jump left on the board");
            self.over = true;
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.over {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    pub fn select_start(&mut self, x: usize, y: usize) -> Result<()> {
        self.ensure_live()?;
        self.chain.select_start(&self.board, Pos::new(x, y))
    }

    /// One jump for the current player. The turn passes on once the chain
    /// can no longer continue.
    pub fn jump(&mut self, direction: Direction) -> Result<JumpOutcome> {
        self.ensure_live()?;
        let out = self.chain.jump(&mut self.board, &mut self.players[self.turn], direction)?;
        if self.chain.phase() == ChainPhase::Done {
            self.commit_turn()?;
        }
        Ok(out)
    }

    /// Ends the chain early under the optional rule. A finished chain whose
    /// log write failed is committed again.
    pub fn stop(&mut self) -> Result<()> {
        self.ensure_live()?;
        if self.chain.phase() != ChainPhase::Done {
            self.chain.stop()?;
        }
        self.commit_turn()
    }

    pub fn undo(&mut self) -> Result<Step> {
        self.ensure_live()?;
        self.chain.undo(&mut self.board, &mut self.players[self.turn])
    }

    /// The current player passes without jumping. Two passes in a row end
    /// the game.
    pub fn decline(&mut self) -> Result<TurnOutcome> {
        self.ensure_live()?;
        self.chain.decline()?;
        warn!("{} declines to move", self.current().name);
        self.passes += 1;
        self.turn = 1 - self.turn;
        if self.passes >= 2 {
            self.over = true;
        }
        Ok(TurnOutcome::Declined)
    }

    /// Searches for and plays a whole chain for the current player.
    pub fn play_computer_turn(&mut self, searcher: &mut Searcher) -> Result<TurnOutcome> {
        self.ensure_live()?;
        if self.chain.phase() != ChainPhase::SelectingStart {
            return Err(GameError::WrongPhase(self.chain.phase()));
        }
        let t = self.turn;
        let Some(best) = searcher.choose_start(&self.board, &self.players[t], &self.players[1 - t]) else {
            warn!("{} has no legal jump and forfeits", self.players[t].name);
            self.over = true;
            return Ok(TurnOutcome::Forfeit);
        };
        self.chain.select_start(&self.board, best.start)?;
        let mut out = self.chain.jump(&mut self.board, &mut self.players[t], best.direction)?;
        let mut sets = out.sets;
        while out.can_continue {
            let dir = searcher
                .choose_continuation(&self.board, &self.players[t], &self.players[1 - t], out.landing)
                .ok_or(GameError::NoMoveFromHere { x: out.landing.x, y: out.landing.y })?;
            out = self.chain.jump(&mut self.board, &mut self.players[t], dir)?;
            sets += out.sets;
        }
        let jumps = self.chain.steps().len();
        self.commit_turn()?;
        Ok(TurnOutcome::Committed { jumps, sets })
    }

    /// The chain stays pending in `Done` until its records are on disk.
    fn commit_turn(&mut self) -> Result<()> {
        let id = self.players[self.turn].id;
        let records: Vec<MoveRecord> = self.chain.jumps().map(|j| MoveRecord::new(id, j)).collect();
        if let Some(w) = self.writer.as_mut() {
            w.append(&records)?;
        }
        self.chain.take();
        for r in &records {
            self.log.push_move(*r);
        }
        let p = &self.players[self.turn];
        info!("{} commits {} jump(s), score {}", p.name, records.len(), p.score);
        self.passes = 0;
        self.turn = 1 - self.turn;
        self.refresh_over();
        Ok(())
    }

    pub fn summary(&self) -> GameSummary {
        let [a, b] = &self.players;
        let winner = match a.score.cmp(&b.score) {
            std::cmp::Ordering::Greater => Some(a.id),
            std::cmp::Ordering::Less => Some(b.id),
            std::cmp::Ordering::Equal => None,
        };
        GameSummary {
            size: self.board.size(),
            moves: self.log.moves().len(),
            over: self.over,
            winner,
            players: self
                .players
                .iter()
                .map(|p| PlayerSummary {
                    id: p.id,
                    name: p.name.clone(),
                    kind: p.kind,
                    score: p.score,
                    piece_counts: p.piece_counts,
                })
                .collect(),
            final_board: self
                .board
                .rows()
                .map(|row| row.iter().map(|c| c.map_or(' ', PieceColor::letter)).collect())
                .collect(),
        }
    }
}
