use hopset::config::{GameConfig, PlayerSpec};
use hopset::game::{GameSession, PlayerKind};
use hopset::replay::ReplayLog;
use hopset::search::Searcher;
use hopset::GameError;
use pretty_assertions::assert_eq;
use std::fs::create_dir_all;

fn cpu_config(seed: u64, size: usize) -> GameConfig {
    GameConfig {
        size,
        seed: Some(seed),
        players: [
            PlayerSpec { name: "left".to_string(), kind: PlayerKind::Computer },
            PlayerSpec { name: "right".to_string(), kind: PlayerKind::Computer },
        ],
        ..GameConfig::default()
    }
}

fn play_out(session: &mut GameSession) {
    let mut searcher = Searcher::default();
    let mut turns = 0;
    while !session.is_over() && turns < 500 {
        session.play_computer_turn(&mut searcher).unwrap();
        turns += 1;
    }
}

#[test]
fn replay_reproduces_live_game() {
    for seed in [1u64, 7, 99] {
        let mut s = GameSession::from_config(&cpu_config(seed, 8)).unwrap();
        play_out(&mut s);
        let text = s.log().to_text();
        let parsed = ReplayLog::parse(&text).unwrap();
        assert_eq!(&parsed, s.log());
        let r = parsed.replay().unwrap();
        assert_eq!(&r.board, s.board());
        assert_eq!(&r.players, s.players());
    }
}

#[test]
fn log_file_matches_in_memory_log() {
    let dir = std::path::Path::new("target/replay_test");
    create_dir_all(dir).unwrap();
    let path = dir.join("game.log");
    let mut s = GameSession::from_config(&cpu_config(5, 6)).unwrap();
    s.log_to_file(&path).unwrap();
    play_out(&mut s);
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, s.log().to_text());
    let r = ReplayLog::parse(&on_disk).unwrap().replay().unwrap();
    assert_eq!(&r.players, s.players());
}

#[test]
fn tampered_log_is_rejected() {
    let mut s = GameSession::from_config(&cpu_config(11, 8)).unwrap();
    play_out(&mut s);
    assert!(!s.log().moves().is_empty());
    let mut lines: Vec<String> = s.log().to_text().lines().map(String::from).collect();
    // replay the first move twice: its source is empty the second time
    let first_move = lines.iter().position(|l| l.starts_with("move:")).unwrap();
    lines.insert(first_move + 1, lines[first_move].clone());
    let text = lines.join("\n");
    let err = ReplayLog::parse(&text).unwrap().replay().unwrap_err();
    assert!(matches!(err, GameError::CorruptLog { .. }), "{err}");
}
