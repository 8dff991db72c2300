//! Append-only text log of a game and deterministic replay.
//!
//! ```text
//! size: 4
//! board:
//! AB C
//! D  E
//! A  B
//! CDEA
//! player: id: 1, type: 0, name: alice
//! player: id: 2, type: 1, name: Computer
//! move: player: 1, x: 3, y: 0, direction: 0
//! ```
//!
//! Board lines hold one character per cell: a space for empty, `A`-`E` for a
//! piece. Directions are 0=Up, 1=Down, 2=Left, 3=Right; player type 0 is
//! human and 1 computer. Every committed jump is one `move:` line.

use log::info;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::board::jump::{self, Direction, Jump};
use crate::board::{Board, Cell, PieceColor};
use crate::error::{GameError, Result};
use crate::game::player::{check_name, Player, PlayerKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerDecl {
    pub id: u8,
    pub kind: PlayerKind,
    pub name: String,
}

impl From<&Player> for PlayerDecl {
    fn from(p: &Player) -> Self {
        Self { id: p.id, kind: p.kind, name: p.name.clone() }
    }
}

impl fmt::Display for PlayerDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player: id: {}, type: {}, name: {}", self.id, self.kind.code(), self.name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub player: u8,
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
}

impl MoveRecord {
    pub fn new(player: u8, jump: Jump) -> Self {
        Self { player, x: jump.x, y: jump.y, direction: jump.direction }
    }

    pub fn jump(&self) -> Jump {
        Jump::new(self.x, self.y, self.direction)
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "move: player: {}, x: {}, y: {}, direction: {}",
            self.player,
            self.x,
            self.y,
            self.direction.code()
        )
    }
}

fn snapshot_text(board: &Board) -> String {
    let mut s = format!("size: {}\nboard:\n", board.size());
    for row in board.rows() {
        s.extend(row.iter().map(|c| c.map_or(' ', PieceColor::letter)));
        s.push('\n');
    }
    s
}

/// Final state reconstructed from a log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replayed {
    pub board: Board,
    pub players: [Player; 2],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayLog {
    board: Board,
    players: [PlayerDecl; 2],
    moves: Vec<MoveRecord>,
    /// Source line of each move, for error reports.
    move_lines: Vec<usize>,
}

fn corrupt(line: usize, reason: impl Into<String>) -> GameError {
    GameError::CorruptLog { line, reason: reason.into() }
}

/// Splits `key: value, key: value` and checks the keys appear in order.
fn fields<'a>(rest: &'a str, keys: &[&str], line: usize) -> Result<Vec<&'a str>> {
    let parts: Vec<&str> = rest.splitn(keys.len(), ',').map(str::trim).collect();
    if parts.len() != keys.len() {
        return Err(corrupt(line, format!("expected {} fields", keys.len())));
    }
    keys.iter()
        .zip(parts)
        .map(|(key, part)| {
            part.strip_prefix(key)
                .and_then(|p| p.strip_prefix(':'))
                .map(str::trim)
                .ok_or_else(|| corrupt(line, format!("expected field `{key}`")))
        })
        .collect()
}

fn number<T: std::str::FromStr>(s: &str, what: &str, line: usize) -> Result<T> {
    s.parse().map_err(|_| corrupt(line, format!("bad {what}: {s:?}")))
}

impl ReplayLog {
    pub fn new(board: &Board, players: &[Player; 2]) -> Self {
        Self {
            board: board.clone(),
            players: [(&players[0]).into(), (&players[1]).into()],
            moves: Vec::new(),
            move_lines: Vec::new(),
        }
    }

    pub fn initial_board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[PlayerDecl; 2] {
        &self.players
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn push_move(&mut self, record: MoveRecord) {
        self.move_lines.push(self.header_lines() + self.moves.len() + 1);
        self.moves.push(record);
    }

    /// Lines before the first move record.
    fn header_lines(&self) -> usize {
        2 + self.board.size() + 2
    }

    pub fn header_text(&self) -> String {
        let mut s = snapshot_text(&self.board);
        for p in &self.players {
            s.push_str(&format!("{p}\n"));
        }
        s
    }

    pub fn to_text(&self) -> String {
        let mut s = self.header_text();
        for m in &self.moves {
            s.push_str(&format!("{m}\n"));
        }
        s
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().map(|l| l.strip_suffix('\r').unwrap_or(l)).enumerate().map(|(i, l)| (i + 1, l));
        let mut next = |what: &str| lines.next().ok_or_else(|| corrupt(0, format!("missing {what}")));

        let (ln, l) = next("size")?;
        let size: usize = number(l.strip_prefix("size:").ok_or_else(|| corrupt(ln, "expected `size:`"))?.trim(), "size", ln)?;
        crate::board::check_size(size).map_err(|e| corrupt(ln, e.to_string()))?;
        let (ln, l) = next("board")?;
        if l.trim_end() != "board:" {
            return Err(corrupt(ln, "expected `board:`"));
        }
        let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(size);
        for _ in 0..size {
            let (ln, l) = next("board row")?;
            let mut row = Vec::with_capacity(size);
            for c in l.chars() {
                match c {
                    ' ' => row.push(None),
                    _ => row.push(Some(PieceColor::from_letter(c).ok_or_else(|| corrupt(ln, format!("bad cell {c:?}")))?)),
                }
            }
            if row.len() > size {
                return Err(corrupt(ln, format!("board row longer than {size}")));
            }
            // editors strip trailing blanks
            row.resize(size, None);
            rows.push(row);
        }
        let board = Board::from_rows(&rows)?;

        let mut decls: [Option<PlayerDecl>; 2] = [None, None];
        let mut moves = Vec::new();
        let mut move_lines = Vec::new();
        for (ln, l) in lines {
            if let Some(rest) = l.strip_prefix("player:") {
                if !moves.is_empty() {
                    return Err(corrupt(ln, "player declaration after moves"));
                }
                let f = fields(rest, &["id", "type", "name"], ln)?;
                let id: u8 = number(f[0], "player id", ln)?;
                let kind = PlayerKind::from_code(number(f[1], "player type", ln)?)
                    .ok_or_else(|| corrupt(ln, format!("bad player type {}", f[1])))?;
                check_name(f[2]).map_err(|e| corrupt(ln, e.to_string()))?;
                let slot = match id {
                    1 | 2 => &mut decls[id as usize - 1],
                    _ => return Err(corrupt(ln, format!("bad player id {id}"))),
                };
                if slot.is_some() {
                    return Err(corrupt(ln, format!("player {id} declared twice")));
                }
                *slot = Some(PlayerDecl { id, kind, name: f[2].to_string() });
            } else if let Some(rest) = l.strip_prefix("move:") {
                if decls.iter().any(Option::is_none) {
                    return Err(corrupt(ln, "move before both players are declared"));
                }
                let f = fields(rest, &["player", "x", "y", "direction"], ln)?;
                let player: u8 = number(f[0], "player id", ln)?;
                if !(1..=2).contains(&player) {
                    return Err(corrupt(ln, format!("bad player id {player}")));
                }
                let x = number(f[1], "x", ln)?;
                let y = number(f[2], "y", ln)?;
                let direction = Direction::from_code(number(f[3], "direction", ln)?)
                    .ok_or_else(|| corrupt(ln, format!("bad direction {}", f[3])))?;
                moves.push(MoveRecord { player, x, y, direction });
                move_lines.push(ln);
            } else if l.trim().is_empty() {
                continue;
            } else {
                return Err(corrupt(ln, format!("unknown record {l:?}")));
            }
        }
        let [Some(p1), Some(p2)] = decls else {
            return Err(corrupt(0, "missing player declaration"));
        };
        Ok(Self { board, players: [p1, p2], moves, move_lines })
    }

    /// Rebuilds the game from the snapshot and applies every move. An
    /// illegal recorded jump aborts the replay.
    pub fn replay(&self) -> Result<Replayed> {
        let mut board = self.board.clone();
        let mut players = [
            Player::new(self.players[0].id, self.players[0].kind, &self.players[0].name)?,
            Player::new(self.players[1].id, self.players[1].kind, &self.players[1].name)?,
        ];
        for (m, &ln) in self.moves.iter().zip(&self.move_lines) {
            let j = m.jump();
            match board.at(j.source()) {
                Ok(Some(_)) => {}
                Ok(None) => return Err(corrupt(ln, format!("no piece at ({}, {})", j.x, j.y))),
                Err(e) => return Err(corrupt(ln, e.to_string())),
            }
            let captured = jump::validate(&board, &j).map_err(|e| corrupt(ln, e.to_string()))?;
            jump::execute(&mut board, &j).map_err(|e| corrupt(ln, e.to_string()))?;
            players[m.player as usize - 1].credit(captured);
        }
        for p in &mut players {
            p.settle_sets();
        }
        info!(
            "replayed {} moves: {} {} - {} {}",
            self.moves.len(),
            players[0].name,
            players[0].score,
            players[1].name,
            players[1].score
        );
        Ok(Replayed { board, players })
    }
}

/// Durable sink for a log: every append is flushed and synced before it
/// returns.
pub struct ReplayWriter {
    file: File,
}

impl ReplayWriter {
    /// Creates (truncating) `path` and writes the snapshot and declarations.
    pub fn create<P: AsRef<Path>>(path: P, log: &ReplayLog) -> Result<Self> {
        let file = OpenOptions::new().create(true).write(true).truncate(true).open(path)?;
        let mut w = Self::from_file(file);
        w.write_text(&log.header_text())?;
        Ok(w)
    }

    pub(crate) fn from_file(file: File) -> Self {
        Self { file }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.file.write_all(text.as_bytes())?;
        self.file.flush()?;
        self.file.sync_data()?;
        Ok(())
    }

    pub fn append(&mut self, moves: &[MoveRecord]) -> Result<()> {
        let text: String = moves.iter().map(|m| format!("{m}\n")).collect();
        self.write_text(&text)
    }
}
