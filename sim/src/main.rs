//! Simulate many lottery sessions to see how coin count and catalog size
//! affect collection progress.
//!
//! ```text
//! lottery-sim --items 100 --coins 30 --sessions 2000 --max-spins 5000
//! ```

mod stats;

use std::process::ExitCode;

use clap::Parser;
use lottery_core::{LotteryMachine, MachineConfig, MemoryStorage, XorShiftRng};
use rayon::prelude::*;

use crate::stats::{SessionResult, Summary};

#[derive(Debug, Parser)]
#[command(name = "lottery-sim", about = "Monte Carlo simulation of lottery machine sessions")]
struct Args {
    /// Catalog size
    #[arg(long, default_value_t = lottery_core::DEFAULT_TOTAL_ITEMS)]
    items: u32,

    /// Coins inserted for every spin
    #[arg(long, default_value_t = 1)]
    coins: u32,

    /// Number of independent sessions
    #[arg(long, default_value_t = 1000)]
    sessions: u64,

    /// Give up on a session after this many spins
    #[arg(long, default_value_t = 10_000)]
    max_spins: u64,

    /// Base seed; session `i` uses `seed + i`
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn run_session(args: &Args, index: u64) -> Result<SessionResult, lottery_core::ConfigError> {
    let mut machine = LotteryMachine::new(
        MachineConfig::with_total_items(args.items),
        MemoryStorage::new(),
        XorShiftRng::seed_from_u64(args.seed.wrapping_add(index)),
    )?;
    machine.set_coins(i64::from(args.coins));

    let mut spins = 0;
    let mut repeats = 0;
    while spins < args.max_spins && !machine.state().collection.is_complete(machine.catalog()) {
        let Some(item) = machine.spin_now() else {
            break;
        };
        spins += 1;
        if machine
            .state()
            .collection
            .get(item.id)
            .is_some_and(|entry| entry.amount > 1)
        {
            repeats += 1;
        }
    }

    let collection = &machine.state().collection;
    Ok(SessionResult {
        spins,
        owned: collection.len() as u32,
        completed: collection.is_complete(machine.catalog()),
        repeats,
    })
}

fn print_summary(args: &Args, summary: &Summary) {
    println!(
        "{} items, {} coin(s), {} sessions (max {} spins)",
        args.items, args.coins, summary.sessions, args.max_spins
    );
    println!(
        "completed:        {} ({:.1}%)",
        summary.completed,
        summary.completion_rate * 100.0
    );
    println!("mean owned:       {:.1}", summary.mean_owned);
    println!("mean repeat share {:.1}%", summary.mean_repeat_share * 100.0);
    match &summary.spins_to_complete {
        Some(dist) => println!(
            "spins to complete: min {} / median {} / p90 {} / max {} (mean {:.1})",
            dist.min, dist.median, dist.p90, dist.max, dist.mean
        ),
        None => println!("spins to complete: no session completed"),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = MachineConfig::with_total_items(args.items).validate() {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    log::info!(
        "simulating {} sessions of {} items with {} coin(s)",
        args.sessions,
        args.items,
        args.coins
    );

    let results: Result<Vec<SessionResult>, _> = (0..args.sessions)
        .into_par_iter()
        .map(|index| run_session(&args, index))
        .collect();

    let results = match results {
        Ok(results) => results,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let summary = Summary::from_results(&results);
    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_summary(&args, &summary);
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: u32, coins: u32) -> Args {
        Args {
            items,
            coins,
            sessions: 1,
            max_spins: 1_000,
            seed: 9,
            json: false,
        }
    }

    #[test]
    fn test_enough_coins_complete_small_catalog() {
        let result = run_session(&args(10, 10), 0).unwrap();
        assert!(result.completed);
        assert_eq!(result.owned, 10);
        assert_eq!(result.repeats, 0, "fresh items only until complete");
        assert_eq!(result.spins, 10);
    }

    #[test]
    fn test_single_coin_stalls_at_half() {
        let result = run_session(&args(10, 1), 0).unwrap();
        assert!(!result.completed);
        assert_eq!(result.owned, 5);
        assert_eq!(result.spins, 1_000);
    }

    #[test]
    fn test_zero_items_is_rejected() {
        assert!(run_session(&args(0, 1), 0).is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["lottery-sim", "--items", "114", "--coins", "3", "--json"]);
        assert_eq!(args.items, 114);
        assert_eq!(args.coins, 3);
        assert!(args.json);
        assert_eq!(args.sessions, 1000);
    }
}
