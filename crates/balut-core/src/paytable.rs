//! Coefficient tables (payout multipliers per combination)

use serde::{Deserialize, Serialize};

use crate::combination::CombinationCategory;
use crate::error::{BalutError, BalutResult};

/// Payout multiplier for each combination.
///
/// The table is a plain value: the base paytable and any calibrated variant
/// are independent instances of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    pub balut: f64,
    pub straight: f64,
    pub full_house: f64,
    pub pair: f64,
    pub other: f64,
}

impl CoefficientTable {
    /// The published base paytable
    pub fn base() -> Self {
        Self {
            balut: 4.0,
            straight: 5.0,
            full_house: 3.0,
            pair: 2.0,
            other: 0.0,
        }
    }

    /// A table paying nothing
    pub fn zero() -> Self {
        Self {
            balut: 0.0,
            straight: 0.0,
            full_house: 0.0,
            pair: 0.0,
            other: 0.0,
        }
    }

    /// Coefficient for a category
    pub fn get(&self, category: CombinationCategory) -> f64 {
        match category {
            CombinationCategory::Balut => self.balut,
            CombinationCategory::Straight => self.straight,
            CombinationCategory::FullHouse => self.full_house,
            CombinationCategory::Pair => self.pair,
            CombinationCategory::Other => self.other,
        }
    }

    /// Replace the coefficient for a category
    pub fn set(&mut self, category: CombinationCategory, coefficient: f64) {
        let slot = match category {
            CombinationCategory::Balut => &mut self.balut,
            CombinationCategory::Straight => &mut self.straight,
            CombinationCategory::FullHouse => &mut self.full_house,
            CombinationCategory::Pair => &mut self.pair,
            CombinationCategory::Other => &mut self.other,
        };
        *slot = coefficient;
    }

    /// Builder: set a coefficient
    pub fn with(mut self, category: CombinationCategory, coefficient: f64) -> Self {
        self.set(category, coefficient);
        self
    }

    /// Every coefficient multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = *self;
        for category in CombinationCategory::ALL {
            out.set(category, self.get(category) * factor);
        }
        out
    }

    /// (category, coefficient) pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (CombinationCategory, f64)> + '_ {
        CombinationCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Check every coefficient is finite and nonnegative
    pub fn validate(&self) -> BalutResult<()> {
        for (category, coefficient) in self.iter() {
            if !coefficient.is_finite() || coefficient < 0.0 {
                return Err(BalutError::InvalidInput(format!(
                    "coefficient for {category} must be finite and >= 0, got {coefficient}"
                )));
            }
        }
        Ok(())
    }

    /// Categories sorted from highest to lowest coefficient (stable on ties)
    pub fn ranking(&self) -> Vec<CombinationCategory> {
        let mut ranked = CombinationCategory::ALL.to_vec();
        ranked.sort_by(|a, b| self.get(*b).total_cmp(&self.get(*a)));
        ranked
    }
}

impl Default for CoefficientTable {
    fn default() -> Self {
        Self::base()
    }
}
