//! # balut-sim — Monte-Carlo RTP estimation
//!
//! Plays the five-dice game many times against a coefficient table and
//! reports the empirical return-to-player.
//!
//! ## Features
//!
//! - **Injected randomness**: every run draws from a [`DiceSource`]
//! - **Reproducible runs**: ChaCha8 streams seeded from a `u64`
//! - **Parallel runs**: trials split into chunks on the rayon pool, one
//!   independent stream per chunk
//! - **Convergence study**: RTP at increasing trial counts next to the
//!   analytical value
//!
//! ## Example
//!
//! ```rust,ignore
//! use balut_core::CoefficientTable;
//! use balut_sim::{SeededDice, estimate_rtp};
//!
//! let mut dice = SeededDice::new(42);
//! let result = estimate_rtp(100_000, 1.0, &CoefficientTable::base(), &mut dice)?;
//! println!("RTP {:.2}%", result.rtp_percent());
//! ```

pub mod config;
pub mod convergence;
pub mod estimator;
pub mod source;

pub use config::SimConfig;
pub use convergence::{ConvergencePoint, ConvergenceReport, DEFAULT_TRIAL_COUNTS, convergence_study};
pub use estimator::{SimulationResult, estimate, estimate_parallel, estimate_rtp};
pub use source::{DiceSource, RngDice, ScriptedDice, SeededDice};
