//! Ledger records

use serde::{Deserialize, Serialize};

/// What a transaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Opening deposit, written once per ledger
    Init,
    /// Stake placed on a round
    Bet,
    /// Payout from a round
    Win,
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "init" => Ok(Self::Init),
            "bet" => Ok(Self::Bet),
            "win" => Ok(Self::Win),
            other => Err(format!("unknown transaction kind '{other}'")),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Init => "init",
            Self::Bet => "bet",
            Self::Win => "win",
        })
    }
}

/// One recorded balance change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Position in the ledger, starting at 1
    pub id: u64,
    /// Signed change to the balance
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("bet".parse::<TransactionKind>().unwrap(), TransactionKind::Bet);
        assert_eq!("WIN".parse::<TransactionKind>().unwrap(), TransactionKind::Win);
        assert!("refund".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_json_shape() {
        let tx = Transaction {
            id: 3,
            amount: -10,
            kind: TransactionKind::Bet,
        };
        let json = serde_json::to_string(&tx).unwrap();
        assert_eq!(json, r#"{"id":3,"amount":-10,"type":"bet"}"#);
        assert_eq!(serde_json::from_str::<Transaction>(&json).unwrap(), tx);
    }
}
