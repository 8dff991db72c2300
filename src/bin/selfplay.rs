use clap::Parser;
use hopset::config::{ContinuationRule, MoveAvailability, RuleSet};
use hopset::search::SearchParams;
use hopset::selfplay::{generate_games, write_logs, SelfPlayParams};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hopset-selfplay", about = "Play computer-vs-computer games and write their logs")]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 8)]
    size: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 1_000)]
    max_turns: usize,
    #[arg(long, default_value = "out/selfplay")]
    out: PathBuf,
    /// Probe only upward jumps when deciding whether the game is over
    #[arg(long)]
    up_only_availability: bool,
    /// Take the first legal direction for chain continuations instead of searching
    #[arg(long)]
    no_replan: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        size: a.size,
        seed: a.seed,
        max_turns: a.max_turns,
        rules: RuleSet {
            continuation: ContinuationRule::Forced,
            availability: if a.up_only_availability { MoveAvailability::UpOnly } else { MoveAvailability::AllDirections },
        },
        search: SearchParams { replan_each_step: !a.no_replan },
    };
    eprintln!("Playing {} games on {}x{} (seed={})", a.games, a.size, a.size, a.seed);
    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")?);
    let games = generate_games(&params, |_| pb.inc(1))?;
    pb.finish();
    let (mut wins1, mut wins2, mut draws) = (0, 0, 0);
    for g in &games {
        match g.summary.winner {
            Some(1) => wins1 += 1,
            Some(_) => wins2 += 1,
            None => draws += 1,
        }
    }
    eprintln!("cpu1 {wins1} / cpu2 {wins2} / draws {draws}");
    let paths = write_logs(&games, &a.out)?;
    eprintln!("Wrote {} logs to {}", paths.len(), a.out.display());
    Ok(())
}
