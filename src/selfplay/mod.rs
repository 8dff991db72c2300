use log::info;
use rayon::prelude::*;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{GameConfig, PlayerSpec, RuleSet};
use crate::error::Result;
use crate::game::{GameSession, GameSummary, PlayerKind, TurnOutcome};
use crate::replay::ReplayLog;
use crate::search::{SearchParams, Searcher};

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub size: usize,
    pub seed: u64,
    pub max_turns: usize,
    pub rules: RuleSet,
    pub search: SearchParams,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 10, size: 8, seed: 42, max_turns: 1_000, rules: RuleSet::default(), search: SearchParams::default() }
    }
}

pub struct GameRecord {
    pub log: ReplayLog,
    pub summary: GameSummary,
    pub turns: usize,
}

/// Plays one computer-vs-computer game seeded with `seed`.
pub fn play_game(params: &SelfPlayParams, seed: u64) -> Result<GameRecord> {
    let cfg = GameConfig {
        size: params.size,
        seed: Some(seed),
        players: [
            PlayerSpec { name: "cpu1".to_string(), kind: PlayerKind::Computer },
            PlayerSpec { name: "cpu2".to_string(), kind: PlayerKind::Computer },
        ],
        rules: params.rules,
        search: params.search,
    };
    let mut session = GameSession::from_config(&cfg)?;
    let mut searcher = Searcher::new(params.search);
    let mut turns = 0usize;
    while !session.is_over() && turns < params.max_turns {
        if session.play_computer_turn(&mut searcher)? == TurnOutcome::Forfeit {
            break;
        }
        turns += 1;
    }
    Ok(GameRecord { log: session.log().clone(), summary: session.summary(), turns })
}

/// Games run in parallel; game `i` uses seed `params.seed + i` and results
/// come back in index order. `on_done` is called from the worker thread
/// after each game finishes.
pub fn generate_games<F>(params: &SelfPlayParams, on_done: F) -> Result<Vec<GameRecord>>
where
    F: Fn(&GameRecord) + Sync,
{
    let games = (0..params.games)
        .into_par_iter()
        .map(|i| {
            let g = play_game(params, params.seed.wrapping_add(i as u64))?;
            on_done(&g);
            Ok(g)
        })
        .collect::<Result<Vec<_>>>()?;
    info!("generated {} self-play games", games.len());
    Ok(games)
}

pub fn write_logs<P: AsRef<Path>>(games: &[GameRecord], out_dir: P) -> std::io::Result<Vec<PathBuf>> {
    create_dir_all(&out_dir)?;
    let mut out_paths = Vec::with_capacity(games.len());
    for (i, g) in games.iter().enumerate() {
        let path = out_dir.as_ref().join(format!("game_{:06}.log", i));
        let mut w = BufWriter::new(File::create(&path)?);
        w.write_all(g.log.to_text().as_bytes())?;
        w.flush()?;
        out_paths.push(path);
    }
    Ok(out_paths)
}
