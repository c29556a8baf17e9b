//! # balut-core — Payout and probability engine for the five-dice game
//!
//! A player stakes a unit, rolls five dice and is paid according to the
//! combination the dice form. This crate holds everything that does not
//! need a random source:
//!
//! - **Dice model**: validated five-dice rolls and the full 6^5 outcome space
//! - **Classifier**: first-match rules mapping a roll to a combination
//! - **Coefficient tables**: base and calibrated payout multipliers
//! - **Probability model**: exact outcome counts per combination
//! - **Calibration**: rescaling a table so the theoretical RTP hits a target
//!
//! ## Architecture
//!
//! ```text
//! DiceRoll ──classify──> CombinationCategory
//!                              │
//!                              v
//!                      CoefficientTable ──> payout
//!                              │
//! ProbabilityModel ──expected_payout──> calibrate(target) ──> Calibration
//! ```

pub mod calibrate;
pub mod combination;
pub mod config;
pub mod dice;
pub mod error;
pub mod paytable;
pub mod probability;

pub use calibrate::*;
pub use combination::*;
pub use config::*;
pub use dice::*;
pub use error::*;
pub use paytable::*;
pub use probability::*;
