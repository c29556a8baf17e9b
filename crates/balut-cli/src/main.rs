//! Balut odds engine
//!
//! Usage:
//!   balut estimate --trials 1000000   - Monte-Carlo RTP of the paytable
//!   balut converge                    - RTP after 1e3..1e6 simulations
//!   balut calibrate --target 0.95     - Rescale the paytable to a target RTP
//!   balut odds                        - Exact outcome counts per combination
//!   balut classify 3 3 3 5 5          - Classify one roll
//!   balut play --ledger FILE --stake N
//!   balut balance --ledger FILE
//!   balut record --ledger FILE --amount A --kind bet|win

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use balut_core::{
    CoefficientTable, CombinationCategory, PairPatterns, ProbabilityModel, calibrate,
    classify_values,
};
use balut_ledger::{DEFAULT_INITIAL_BALANCE, Ledger, TransactionKind, play_round};
use balut_sim::{
    DEFAULT_TRIAL_COUNTS, SeededDice, SimConfig, convergence_study, estimate_parallel,
};

use crate::config::BalutConfig;

#[derive(Parser)]
#[command(name = "balut", about = "Five-dice payout and probability engine")]
struct Cli {
    /// YAML or JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate RTP by simulation
    Estimate {
        /// Number of rounds
        #[arg(short, long)]
        trials: Option<u64>,
        /// Stake per round
        #[arg(short, long)]
        bet: Option<f64>,
        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
        /// Parallel chunks
        #[arg(short, long)]
        workers: Option<usize>,
        /// Simulate the calibrated table instead of the base one
        #[arg(long)]
        calibrated: bool,
        /// Start from the long-run preset instead of the config file
        #[arg(long)]
        thorough: bool,
    },
    /// RTP at 1e3, 1e4, 1e5 and 1e6 rounds
    Converge {
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Rescale the paytable to a target RTP
    Calibrate {
        /// Target RTP as a fraction
        #[arg(short, long)]
        target: Option<f64>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Exact outcome counts and probabilities
    Odds,
    /// Classify five dice
    Classify {
        #[arg(num_args = 5, value_parser = clap::value_parser!(u8))]
        dice: Vec<u8>,
    },
    /// Play one round against a ledger file
    Play {
        #[arg(short, long)]
        ledger: PathBuf,
        #[arg(long)]
        stake: i64,
        /// Pay out with the calibrated table
        #[arg(long)]
        calibrated: bool,
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Show the ledger balance
    Balance {
        #[arg(short, long)]
        ledger: PathBuf,
    },
    /// Append a bet or win to a ledger
    Record {
        #[arg(short, long)]
        ledger: PathBuf,
        #[arg(short, long, allow_hyphen_values = true)]
        amount: i64,
        /// bet or win
        #[arg(short, long)]
        kind: TransactionKind,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BalutConfig::load(path)?,
        None => BalutConfig::default(),
    };

    match cli.command {
        Commands::Estimate {
            trials,
            bet,
            seed,
            workers,
            calibrated,
            thorough,
        } => run_estimate(&config, trials, bet, seed, workers, calibrated, thorough),
        Commands::Converge { seed } => run_converge(&config, seed),
        Commands::Calibrate { target, json } => run_calibrate(&config, target, json),
        Commands::Odds => run_odds(&config),
        Commands::Classify { dice } => run_classify(&config, &dice),
        Commands::Play {
            ledger,
            stake,
            calibrated,
            seed,
        } => run_play(&config, &ledger, stake, calibrated, seed),
        Commands::Balance { ledger } => run_balance(&ledger),
        Commands::Record {
            ledger,
            amount,
            kind,
        } => run_record(&ledger, amount, kind),
    }
}

fn payout_table(config: &BalutConfig, calibrated: bool) -> Result<CoefficientTable> {
    let base = config.game.coefficients;
    if !calibrated {
        return Ok(base);
    }
    let calibration = calibrate(config.game.target_rtp, &base).context("Calibration failed")?;
    Ok(calibration.table)
}

fn run_estimate(
    config: &BalutConfig,
    trials: Option<u64>,
    bet: Option<f64>,
    seed: Option<u64>,
    workers: Option<usize>,
    calibrated: bool,
    thorough: bool,
) -> Result<()> {
    let mut sim = if thorough {
        SimConfig::thorough()
    } else {
        config.simulation.clone()
    };
    if let Some(trials) = trials {
        sim = sim.with_trials(trials);
    }
    if let Some(bet) = bet {
        sim = sim.with_bet_amount(bet);
    }
    if let Some(seed) = seed {
        sim = sim.with_seed(seed);
    }
    if let Some(workers) = workers {
        sim = sim.with_workers(workers);
    }

    let table = payout_table(config, calibrated)?;
    let result = estimate_parallel(&sim, &table)?;

    println!(
        "RTP after {} simulations: {:.2}% (± {:.2})",
        result.trials(),
        result.rtp_percent(),
        result.standard_error_percent()
    );
    Ok(())
}

fn run_converge(config: &BalutConfig, seed: Option<u64>) -> Result<()> {
    let mut sim = config.simulation.clone();
    if let Some(seed) = seed {
        sim = sim.with_seed(seed);
    }

    let report = convergence_study(&DEFAULT_TRIAL_COUNTS, &sim, &config.game.coefficients)?;
    for point in &report.points {
        println!(
            "RTP after {} simulations: {:.2}%",
            point.trials, point.rtp_percent
        );
    }
    println!("Analytical RTP: {:.2}%", report.analytical_rtp_percent);
    println!("Max deviation: {:.2} pp", report.max_deviation());
    Ok(())
}

fn run_calibrate(config: &BalutConfig, target: Option<f64>, json: bool) -> Result<()> {
    let game = match target {
        Some(target) => config.game.clone().with_target_rtp(target),
        None => config.game.clone(),
    };
    game.validate()?;
    let target = game.target_rtp;
    let calibration = calibrate(target, &game.coefficients)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&calibration)?);
        return Ok(());
    }

    println!("New odds (target RTP {:.2}%):", target * 100.0);
    for (category, coefficient) in calibration.table.iter() {
        if category == CombinationCategory::Other && coefficient == 0.0 {
            continue;
        }
        println!("{:<12} {coefficient:.6}", format!("{category}:"));
    }
    println!("Scale factor: {:.6}", calibration.scale);
    Ok(())
}

fn run_odds(config: &BalutConfig) -> Result<()> {
    let model = ProbabilityModel::closed_form();
    model.validate()?;

    println!("{:<12} {:>6} {:>10} {:>8}", "Combination", "Count", "P", "Coef");
    for (category, count, probability) in model.iter() {
        println!(
            "{:<12} {count:>6} {probability:>10.6} {:>8.3}",
            category.name(),
            config.game.coefficients.get(category)
        );
    }

    let patterns = PairPatterns::closed_form();
    println!(
        "Pair breakdown: one pair {}, two pair {}, three of a kind {}, four of a kind {}",
        patterns.one_pair, patterns.two_pair, patterns.three_of_a_kind, patterns.four_of_a_kind
    );
    println!(
        "Base RTP: {:.4}%",
        model.rtp_percent(&config.game.coefficients)
    );
    Ok(())
}

fn run_classify(config: &BalutConfig, dice: &[u8]) -> Result<()> {
    let category = classify_values(dice)?;
    println!(
        "{category} (coefficient {})",
        config.game.coefficients.get(category)
    );
    Ok(())
}

fn open_ledger(path: &Path) -> Result<Ledger> {
    let mut ledger = Ledger::open(path)
        .with_context(|| format!("Failed to open ledger {}", path.display()))?;
    ledger.ensure_initial_balance(DEFAULT_INITIAL_BALANCE)?;
    Ok(ledger)
}

/// Dice for `play`: `--seed`, then the config seed, then OS entropy
fn play_dice(config: &BalutConfig, seed: Option<u64>) -> SeededDice {
    match seed.or(config.simulation.seed) {
        Some(seed) => SeededDice::new(seed),
        None => SeededDice::from_entropy(),
    }
}

fn run_play(
    config: &BalutConfig,
    ledger_path: &Path,
    stake: i64,
    calibrated: bool,
    seed: Option<u64>,
) -> Result<()> {
    let mut ledger = open_ledger(ledger_path)?;
    let table = payout_table(config, calibrated)?;
    let mut dice = play_dice(config, seed);

    let outcome = play_round(&mut ledger, &table, &mut dice, stake)?;
    println!(
        "Rolled {} -> {}: paid {} on {}, balance {}",
        outcome.roll, outcome.category, outcome.payout, outcome.stake, outcome.balance
    );
    Ok(())
}

fn run_balance(ledger_path: &Path) -> Result<()> {
    let ledger = open_ledger(ledger_path)?;
    println!("{}", serde_json::json!({ "balance": ledger.balance() }));
    Ok(())
}

fn run_record(ledger_path: &Path, amount: i64, kind: TransactionKind) -> Result<()> {
    let mut ledger = open_ledger(ledger_path)?;
    let transaction = ledger.record(amount, kind)?;
    println!("{}", serde_json::to_string(&transaction)?);
    Ok(())
}
