//! Five-dice rolls and the outcome space

use serde::{Deserialize, Serialize};

use crate::error::{BalutError, BalutResult};

/// Dice per roll
pub const DICE_COUNT: usize = 5;

/// Faces per die
pub const FACES: u8 = 6;

/// Number of equally likely ordered outcomes (6^5)
pub const TOTAL_OUTCOMES: u64 = 7776;

/// A validated roll of five six-sided dice, in the order they were thrown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DiceRoll([u8; DICE_COUNT]);

impl DiceRoll {
    /// Create a roll, rejecting any face outside 1..=6
    pub fn new(values: [u8; DICE_COUNT]) -> BalutResult<Self> {
        if let Some(bad) = values.iter().find(|&&v| !(1..=FACES).contains(&v)) {
            return Err(BalutError::InvalidInput(format!(
                "die face {bad} outside 1..={FACES} in {values:?}"
            )));
        }
        Ok(Self(values))
    }

    /// Create a roll from a slice of any length
    pub fn from_slice(values: &[u8]) -> BalutResult<Self> {
        let values: [u8; DICE_COUNT] = values.try_into().map_err(|_| {
            BalutError::InvalidInput(format!(
                "expected {DICE_COUNT} dice, got {}",
                values.len()
            ))
        })?;
        Self::new(values)
    }

    /// Face values in throw order
    pub fn values(&self) -> &[u8; DICE_COUNT] {
        &self.0
    }

    /// Count of each face, indexed by face value (index 0 unused)
    pub fn face_counts(&self) -> [u8; FACES as usize + 1] {
        let mut counts = [0u8; FACES as usize + 1];
        for &v in &self.0 {
            counts[v as usize] += 1;
        }
        counts
    }

    /// Whether a face value appears in the roll
    pub fn contains(&self, face: u8) -> bool {
        self.0.contains(&face)
    }

    /// Iterate every ordered outcome of five dice, 7776 in total
    pub fn all() -> impl Iterator<Item = DiceRoll> {
        (0..TOTAL_OUTCOMES).map(|mut index| {
            let mut values = [0u8; DICE_COUNT];
            for slot in values.iter_mut().rev() {
                *slot = (index % FACES as u64) as u8 + 1;
                index /= FACES as u64;
            }
            DiceRoll(values)
        })
    }
}

impl TryFrom<Vec<u8>> for DiceRoll {
    type Error = BalutError;

    fn try_from(values: Vec<u8>) -> BalutResult<Self> {
        Self::from_slice(&values)
    }
}

impl TryFrom<&[u8]> for DiceRoll {
    type Error = BalutError;

    fn try_from(values: &[u8]) -> BalutResult<Self> {
        Self::from_slice(values)
    }
}

impl From<DiceRoll> for Vec<u8> {
    fn from(roll: DiceRoll) -> Self {
        roll.0.to_vec()
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "[{a} {b} {c} {d} {e}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rejects_out_of_range_faces() {
        assert!(DiceRoll::new([0, 1, 2, 3, 4]).is_err());
        assert!(DiceRoll::new([1, 2, 3, 4, 7]).is_err());
        assert!(DiceRoll::new([1, 2, 3, 4, 6]).is_ok());
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(matches!(
            DiceRoll::from_slice(&[1, 2, 3, 4]),
            Err(BalutError::InvalidInput(_))
        ));
        assert!(DiceRoll::from_slice(&[1, 2, 3, 4, 5, 6]).is_err());
    }

    #[test]
    fn test_outcome_space_is_complete_and_distinct() {
        let all: HashSet<DiceRoll> = DiceRoll::all().collect();
        assert_eq!(all.len() as u64, TOTAL_OUTCOMES);
        assert!(all.contains(&DiceRoll::new([1, 1, 1, 1, 1]).unwrap()));
        assert!(all.contains(&DiceRoll::new([6, 5, 4, 3, 2]).unwrap()));
    }

    #[test]
    fn test_face_counts() {
        let roll = DiceRoll::new([3, 3, 3, 5, 5]).unwrap();
        let counts = roll.face_counts();
        assert_eq!(counts[3], 3);
        assert_eq!(counts[5], 2);
        assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), DICE_COUNT);
    }

    #[test]
    fn test_serde_validates() {
        let roll: DiceRoll = serde_json::from_str("[2,2,5,6,1]").unwrap();
        assert_eq!(roll.values(), &[2, 2, 5, 6, 1]);
        assert!(serde_json::from_str::<DiceRoll>("[2,2,5,6,9]").is_err());
        assert!(serde_json::from_str::<DiceRoll>("[2,2]").is_err());
    }
}
