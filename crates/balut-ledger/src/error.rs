//! Ledger errors

use balut_core::BalutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Init transactions are recorded only by the ledger itself")]
    InitNotAllowed,

    #[error("Invalid stake: {0}")]
    InvalidStake(i64),

    #[error("Insufficient balance: stake {stake}, balance {balance}")]
    InsufficientBalance { stake: i64, balance: i64 },

    #[error("Balance overflow: {amount} on top of {balance}")]
    BalanceOverflow { balance: i64, amount: i64 },

    #[error("Corrupt journal at line {line}: {reason}")]
    CorruptJournal { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Game(#[from] BalutError),
}

/// Result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;
