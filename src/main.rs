use anyhow::{Context, Result};
use clap::Parser;
use hopset::board::jump::Direction;
use hopset::board::parse_coord_label;
use hopset::config::{ContinuationRule, GameConfig, MoveAvailability};
use hopset::game::{ChainPhase, GameSession, PlayerKind, TurnOutcome};
use hopset::search::Searcher;
use hopset::GameError;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Jump pieces, capture colors, complete sets", long_about = None)]
struct Args {
    /// JSON game config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board size (even, 4..=20)
    #[arg(long)]
    size: Option<usize>,

    /// Seed for the initial board
    #[arg(long)]
    seed: Option<u64>,

    /// Player 1: 'h' for human, 'c' for computer
    #[arg(long)]
    p1: Option<String>,

    /// Player 2: 'h' for human, 'c' for computer
    #[arg(long)]
    p2: Option<String>,

    #[arg(long)]
    name1: Option<String>,

    #[arg(long)]
    name2: Option<String>,

    /// Let humans stop a chain that could continue
    #[arg(long)]
    optional_continuation: bool,

    /// Only probe upward jumps when deciding whether anyone can move
    #[arg(long)]
    up_only_availability: bool,

    /// Computer takes the first legal direction after its first jump
    #[arg(long)]
    no_replan: bool,

    /// Append the game log to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Write a JSON summary here when the game ends
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn parse_kind(s: &str) -> Result<PlayerKind> {
    match s.to_lowercase().as_str() {
        "h" | "human" => Ok(PlayerKind::Human),
        "c" | "computer" => Ok(PlayerKind::Computer),
        _ => anyhow::bail!("Invalid player kind: use 'h' or 'c'"),
    }
}

fn parse_direction(s: &str) -> Option<Direction> {
    match s.to_lowercase().as_str() {
        "w" | "up" => Some(Direction::Up),
        "s" | "down" => Some(Direction::Down),
        "a" | "left" => Some(Direction::Left),
        "d" | "right" => Some(Direction::Right),
        _ => None,
    }
}

/// One axis label, `1`-`9` then `A`, `B`, ...
fn parse_coord(token: &str) -> Option<usize> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => parse_coord_label(c),
        _ => None,
    }
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut cfg = match &args.config {
        Some(p) => GameConfig::from_json_file(p)?,
        None => GameConfig::default(),
    };
    if let Some(size) = args.size {
        cfg.size = size;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(k) = &args.p1 {
        cfg.players[0].kind = parse_kind(k)?;
    }
    if let Some(k) = &args.p2 {
        cfg.players[1].kind = parse_kind(k)?;
    }
    if let Some(n) = &args.name1 {
        cfg.players[0].name = n.clone();
    }
    if let Some(n) = &args.name2 {
        cfg.players[1].name = n.clone();
    }
    if args.optional_continuation {
        cfg.rules.continuation = ContinuationRule::Optional;
    }
    if args.up_only_availability {
        cfg.rules.availability = MoveAvailability::UpOnly;
    }
    if args.no_replan {
        cfg.search.replan_each_step = false;
    }
    Ok(cfg)
}

fn print_state(session: &GameSession) {
    println!("\n{}", session.board());
    for p in session.players() {
        let counts: Vec<String> = p.piece_counts.iter().map(|c| c.to_string()).collect();
        println!("{:>12}: score {}  pieces A-E [{}]", p.name, p.score, counts.join(" "));
    }
}

fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Drives one human turn. Returns false when the player quits.
fn human_turn(session: &mut GameSession) -> Result<bool> {
    let name = session.current().name.clone();
    let id = session.current().id;
    while session.current().id == id && !session.is_over() {
        let result = match session.phase() {
            ChainPhase::SelectingStart => {
                let Some(line) = read_line(&format!("{name}, piece to move (X Y), 'pass' or 'quit': "))? else {
                    return Ok(false);
                };
                match line.as_str() {
                    "quit" => return Ok(false),
                    "pass" => session.decline().map(|_| ()),
                    _ => {
                        let coords: Vec<Option<usize>> = line.split_whitespace().map(parse_coord).collect();
                        match coords.as_slice() {
                            [Some(x), Some(y)] => session.select_start(*x, *y),
                            _ => {
                                println!("Enter two coordinates like '3 5'");
                                continue;
                            }
                        }
                    }
                }
            }
            _ => {
                let Some(line) = read_line("Direction (w/a/s/d), 'undo' or 'stop': ")? else {
                    return Ok(false);
                };
                match line.as_str() {
                    "undo" => session.undo().map(|_| ()),
                    "stop" => session.stop(),
                    _ => match parse_direction(&line) {
                        Some(d) => session.jump(d).map(|out| {
                            println!("Captured {}", out.captured);
                            if out.sets > 0 {
                                println!("Set complete!");
                            }
                        }),
                        None => {
                            println!("Unknown direction");
                            continue;
                        }
                    },
                }
            }
        };
        match result {
            Ok(()) => {
                if session.current().id == id {
                    print_state(session);
                }
            }
            Err(e @ GameError::Io(_)) => return Err(e.into()),
            Err(e) => println!("{e}"),
        }
    }
    Ok(true)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = build_config(&args)?;

    let mut session = GameSession::from_config(&cfg)?;
    if let Some(path) = &args.log {
        session
            .log_to_file(path)
            .with_context(|| format!("open log file: {}", path.display()))?;
    }
    let mut searcher = Searcher::new(cfg.search);

    while !session.is_over() {
        print_state(&session);
        println!("\n{}'s turn", session.current().name);
        match session.current().kind {
            PlayerKind::Human => {
                if !human_turn(&mut session)? {
                    println!("Thanks for playing!");
                    break;
                }
            }
            PlayerKind::Computer => match session.play_computer_turn(&mut searcher)? {
                TurnOutcome::Committed { jumps, sets } => {
                    println!("{} jumps {} time(s), completing {} set(s)", session.opponent().name, jumps, sets);
                }
                TurnOutcome::Forfeit => println!("Computer cannot move"),
                TurnOutcome::Declined => {}
            },
        }
    }

    print_state(&session);
    let summary = session.summary();
    match summary.winner.and_then(|id| session.players().iter().find(|p| p.id == id)) {
        Some(p) => println!("\n{} wins!", p.name),
        None => println!("\nIt's a tie!"),
    }
    if let Some(path) = &args.summary_json {
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)
            .with_context(|| format!("write summary: {}", path.display()))?;
    }
    Ok(())
}
