//! Append-only ledger with optional JSON-lines journal

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::transaction::{Transaction, TransactionKind};

/// Opening deposit used when a ledger has none
pub const DEFAULT_INITIAL_BALANCE: i64 = 100;

struct Journal {
    writer: BufWriter<File>,
}

/// Ordered, append-only list of transactions
pub struct Ledger {
    transactions: Vec<Transaction>,
    balance: i64,
    journal: Option<Journal>,
}

impl Ledger {
    /// Ledger that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            transactions: Vec::new(),
            balance: 0,
            journal: None,
        }
    }

    /// Open (or create) a journal file and replay it
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        let (transactions, balance) = if path.exists() {
            read_journal(path)?
        } else {
            (Vec::new(), 0)
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        log::info!(
            "Opened ledger {} with {} transactions",
            path.display(),
            transactions.len()
        );

        Ok(Self {
            transactions,
            balance,
            journal: Some(Journal {
                writer: BufWriter::new(file),
            }),
        })
    }

    /// Record a bet or a win.
    ///
    /// `init` is refused; use [`Self::ensure_initial_balance`].
    pub fn record(&mut self, amount: i64, kind: TransactionKind) -> LedgerResult<Transaction> {
        reject_init(&[(amount, kind)])?;
        let first = self.append(&[(amount, kind)])?;
        Ok(self.transactions[first].clone())
    }

    /// Record several bets and wins with a single journal write.
    ///
    /// Every entry is checked before anything is written: an `init` entry or
    /// a balance overflow rejects the whole batch.
    pub fn record_all(
        &mut self,
        entries: &[(i64, TransactionKind)],
    ) -> LedgerResult<Vec<Transaction>> {
        reject_init(entries)?;
        let first = self.append(entries)?;
        Ok(self.transactions[first..].to_vec())
    }

    /// Record an opening deposit unless one already exists
    pub fn ensure_initial_balance(&mut self, amount: i64) -> LedgerResult<Option<Transaction>> {
        if self.has_init() {
            return Ok(None);
        }
        let first = self.append(&[(amount, TransactionKind::Init)])?;
        Ok(Some(self.transactions[first].clone()))
    }

    /// Whether an opening deposit has been recorded
    pub fn has_init(&self) -> bool {
        self.transactions
            .iter()
            .any(|t| t.kind == TransactionKind::Init)
    }

    /// Sum of all recorded amounts
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// All transactions in record order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Write `entries` and return the index of the first one
    fn append(&mut self, entries: &[(i64, TransactionKind)]) -> LedgerResult<usize> {
        let mut next_id = self.transactions.last().map_or(1, |t| t.id + 1);
        let mut balance = self.balance;
        let mut batch = Vec::with_capacity(entries.len());

        for &(amount, kind) in entries {
            balance = balance
                .checked_add(amount)
                .ok_or(LedgerError::BalanceOverflow { balance, amount })?;
            batch.push(Transaction {
                id: next_id,
                amount,
                kind,
            });
            next_id += 1;
        }

        if let Some(journal) = self.journal.as_mut() {
            // one buffer per batch so a round lands in a single write
            let mut buf = Vec::new();
            for transaction in &batch {
                serde_json::to_writer(&mut buf, transaction)?;
                buf.push(b'\n');
            }
            journal.writer.write_all(&buf)?;
            journal.writer.flush()?;
        }

        for transaction in &batch {
            log::debug!(
                "ledger #{}: {} {}",
                transaction.id,
                transaction.kind,
                transaction.amount
            );
        }
        let first = self.transactions.len();
        self.transactions.extend(batch);
        self.balance = balance;
        Ok(first)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn reject_init(entries: &[(i64, TransactionKind)]) -> LedgerResult<()> {
    match entries.iter().find(|(_, kind)| *kind == TransactionKind::Init) {
        Some((amount, _)) => {
            log::warn!("Refused init transaction of {amount}");
            Err(LedgerError::InitNotAllowed)
        }
        None => Ok(()),
    }
}

fn read_journal(path: &Path) -> LedgerResult<(Vec<Transaction>, i64)> {
    let reader = BufReader::new(File::open(path)?);
    let mut transactions: Vec<Transaction> = Vec::new();
    let mut balance: i64 = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let transaction: Transaction =
            serde_json::from_str(&line).map_err(|e| LedgerError::CorruptJournal {
                line: index + 1,
                reason: e.to_string(),
            })?;
        if let Some(previous) = transactions.last() {
            if transaction.id <= previous.id {
                return Err(LedgerError::CorruptJournal {
                    line: index + 1,
                    reason: format!("id {} does not follow {}", transaction.id, previous.id),
                });
            }
        }
        balance = balance
            .checked_add(transaction.amount)
            .ok_or_else(|| LedgerError::CorruptJournal {
                line: index + 1,
                reason: format!("amount {} overflows balance {balance}", transaction.amount),
            })?;
        transactions.push(transaction);
    }

    Ok((transactions, balance))
}
