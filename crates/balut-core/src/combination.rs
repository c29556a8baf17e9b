//! Combination categories and the roll classifier

use serde::{Deserialize, Serialize};

use crate::dice::{DICE_COUNT, DiceRoll, FACES};
use crate::error::BalutResult;
use crate::paytable::CoefficientTable;

/// Combination a roll can form. Exactly one applies to every roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationCategory {
    /// All five dice equal
    Balut,
    /// Five distinct faces without a 1 or without a 6
    Straight,
    /// Two distinct faces split 3 + 2
    FullHouse,
    /// Any other roll with a repeated face
    Pair,
    /// Everything else, pays nothing on the base table
    Other,
}

impl CombinationCategory {
    /// All categories in table order
    pub const ALL: [CombinationCategory; 5] = [
        CombinationCategory::Balut,
        CombinationCategory::Straight,
        CombinationCategory::FullHouse,
        CombinationCategory::Pair,
        CombinationCategory::Other,
    ];

    /// Position in [`Self::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Self::Balut => "Balut",
            Self::Straight => "Straight",
            Self::FullHouse => "Full house",
            Self::Pair => "Pair",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for CombinationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a roll.
///
/// Rules are checked in order and the first match wins:
///
/// 1. one distinct face → Balut
/// 2. five distinct faces, missing 1 or missing 6 → Straight
/// 3. two distinct faces with a largest count of 3 or 2 → FullHouse
/// 4. any face repeated → Pair
/// 5. otherwise → Other
///
/// The `max_count == 2` arm of rule 3 cannot fire for five dice; it is kept
/// so the rule reads the same as the published paytable.
pub fn classify(roll: &DiceRoll) -> CombinationCategory {
    let counts = roll.face_counts();
    let unique = counts.iter().filter(|&&c| c > 0).count();
    let max_count = counts.iter().copied().max().unwrap_or(0);

    if unique == 1 {
        return CombinationCategory::Balut;
    }
    if unique == DICE_COUNT && (!roll.contains(1) || !roll.contains(FACES)) {
        return CombinationCategory::Straight;
    }
    if unique == 2 && (max_count == 3 || max_count == 2) {
        return CombinationCategory::FullHouse;
    }
    if max_count >= 2 {
        return CombinationCategory::Pair;
    }
    CombinationCategory::Other
}

/// Validate raw face values and classify them
pub fn classify_values(values: &[u8]) -> BalutResult<CombinationCategory> {
    DiceRoll::from_slice(values).map(|roll| classify(&roll))
}

/// Payout multiplier a roll earns under a table
pub fn payout_of(roll: &DiceRoll, table: &CoefficientTable) -> f64 {
    table.get(classify(roll))
}
