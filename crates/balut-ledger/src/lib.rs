//! # balut-ledger — Append-only transaction ledger
//!
//! Records the money side of the game: an initial deposit, every stake and
//! every payout. Records are never edited or removed; the balance is the sum
//! of all recorded amounts.
//!
//! Ledgers live in memory or in a JSON-lines journal that is replayed on
//! open and appended on every record.

pub mod error;
pub mod ledger;
pub mod round;
pub mod transaction;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{DEFAULT_INITIAL_BALANCE, Ledger};
pub use round::{RoundOutcome, play_round};
pub use transaction::{Transaction, TransactionKind};
