//! Drift Score entry point
//!
//! Drives a session with a seeded scripted drive and prints the level
//! summary. Useful as a smoke test for tuning files.

use std::path::PathBuf;

use clap::Parser;

use drift_score::consts::SIM_DT;
use drift_score::persistence::{JsonFileStore, MemoryStore, ProfileStore};
use drift_score::sim::{DriveScript, GameEvent};
use drift_score::{DriftResult, Session, Tuning};

#[derive(Parser, Debug)]
#[command(name = "drift-score", about = "Run a simulated drift session")]
struct Args {
    /// Seed for the scripted drive
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Seconds of driving to simulate
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// Tuning JSON (defaults are used when omitted)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Profile save file (kept in memory when omitted)
    #[arg(long)]
    profile: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = match args.profile.clone() {
        Some(path) => run(&args, JsonFileStore::new(path)),
        None => run(&args, MemoryStore::new()),
    };
    if let Err(err) = result {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run<S: ProfileStore>(args: &Args, store: S) -> DriftResult<()> {
    let tuning = Tuning::load_or_default(args.tuning.as_deref())?;
    let mut session = Session::new(tuning, store)?;
    let mut drive = DriveScript::new(args.seed);

    log::info!(
        "Drift Score starting: seed {}, {:.0}s",
        args.seed,
        args.seconds
    );

    let ticks = (args.seconds.max(0.0) / SIM_DT).round() as u64;
    for _ in 0..ticks {
        let input = drive.next_input(SIM_DT);
        for event in session.tick(&input, SIM_DT) {
            match event {
                GameEvent::DriftEnded(run) => {
                    println!("drift: {:>6} pts  +{} coins", run.final_score, run.coins)
                }
                GameEvent::NewRecord { score } => println!("  new record {score}!"),
                GameEvent::MultiplierRaised { multiplier, .. } => {
                    log::info!("multiplier x{multiplier}")
                }
                other => log::debug!("{other:?}"),
            }
        }
    }
    session.shutdown();

    let ledger = session.ledger();
    let profile = session.profile();
    println!();
    println!("runs:   {}", ledger.runs);
    println!("score:  {}", ledger.score);
    println!("coins:  {} (balance {})", ledger.coins, profile.coins);
    println!("record: {}", profile.record_drift_score);
    Ok(())
}
