use anyhow::{Context, Result};
use clap::Parser;
use hopset::replay::ReplayLog;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hopset-replay", about = "Replay a game log and print the final position")]
struct Args {
    /// Game log written by `hopset --log` or `selfplay`
    log: PathBuf,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let text = std::fs::read_to_string(&args.log).with_context(|| format!("read log: {}", args.log.display()))?;
    let log = ReplayLog::parse(&text)?;
    let r = log.replay()?;
    if args.json {
        let obj = serde_json::json!({
            "moves": log.moves().len(),
            "players": r.players.iter().map(|p| serde_json::json!({
                "id": p.id,
                "name": p.name,
                "kind": p.kind,
                "score": p.score,
                "piece_counts": p.piece_counts,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(());
    }
    println!("{}", r.board);
    println!("{} moves replayed", log.moves().len());
    for p in &r.players {
        println!("{:>12}: score {}", p.name, p.score);
    }
    Ok(())
}
