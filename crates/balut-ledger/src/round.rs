//! One staked round of the game, settled against the ledger

use serde::{Deserialize, Serialize};

use balut_core::{CoefficientTable, CombinationCategory, DiceRoll, classify};
use balut_sim::DiceSource;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::transaction::TransactionKind;

/// What happened in a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub roll: DiceRoll,
    pub category: CombinationCategory,
    pub stake: i64,
    /// Whole units paid out (0 when nothing is won)
    pub payout: i64,
    /// Balance after the round
    pub balance: i64,
}

impl RoundOutcome {
    pub fn net(&self) -> i64 {
        self.payout - self.stake
    }
}

/// Stake `stake` units, roll, and record the bet and any win.
///
/// The payout is `stake × coefficient` rounded down to whole units. The dice
/// are thrown before anything is written, so a failing source leaves the
/// ledger untouched. The bet and the win go to the journal in one write; a
/// round is still not atomic on disk, and an I/O error mid-write can leave a
/// truncated last line that [`Ledger::open`] reports as corrupt.
pub fn play_round<S: DiceSource + ?Sized>(
    ledger: &mut Ledger,
    table: &CoefficientTable,
    source: &mut S,
    stake: i64,
) -> LedgerResult<RoundOutcome> {
    if stake <= 0 {
        return Err(LedgerError::InvalidStake(stake));
    }
    let balance = ledger.balance();
    if stake > balance {
        log::warn!("Refused stake {stake} against balance {balance}");
        return Err(LedgerError::InsufficientBalance { stake, balance });
    }
    table.validate()?;

    let roll = source.roll()?;
    let category = classify(&roll);
    let payout = (stake as f64 * table.get(category)).floor() as i64;

    let mut entries = vec![(-stake, TransactionKind::Bet)];
    if payout > 0 {
        entries.push((payout, TransactionKind::Win));
    }
    ledger.record_all(&entries)?;

    let outcome = RoundOutcome {
        roll,
        category,
        stake,
        payout,
        balance: ledger.balance(),
    };
    log::info!(
        "Round {}: {} pays {} on stake {}, balance {}",
        outcome.roll,
        outcome.category,
        outcome.payout,
        outcome.stake,
        outcome.balance
    );
    Ok(outcome)
}
