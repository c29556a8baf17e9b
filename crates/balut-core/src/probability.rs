//! Exact odds of each combination
//!
//! Counts are kept as integers over the 7776 ordered outcomes and only turned
//! into floating point when a probability or expectation is read out, so the
//! model normalises exactly.

use serde::{Deserialize, Serialize};

use crate::combination::{CombinationCategory, classify};
use crate::dice::{DiceRoll, TOTAL_OUTCOMES};
use crate::error::{BalutError, BalutResult};
use crate::paytable::CoefficientTable;

const fn factorial(n: u64) -> u64 {
    if n <= 1 { 1 } else { n * factorial(n - 1) }
}

const fn choose(n: u64, k: u64) -> u64 {
    factorial(n) / (factorial(k) * factorial(n - k))
}

/// Ordered outcomes with five distinct faces (6·5·4·3·2)
pub const ALL_DISTINCT_OUTCOMES: u64 = factorial(6) / factorial(1);

/// Breakdown of the Pair category by the pattern of repeated faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairPatterns {
    pub one_pair: u64,
    pub two_pair: u64,
    pub three_of_a_kind: u64,
    pub four_of_a_kind: u64,
}

impl PairPatterns {
    /// Ordered outcome counts for each pattern
    pub fn closed_form() -> Self {
        Self {
            // pair positions, pair face, three remaining distinct faces in order
            one_pair: choose(5, 2) * 6 * 5 * 4 * 3,
            // two pair faces, singleton face, arrangement 5!/(2!2!1!)
            two_pair: choose(6, 2) * 4 * (factorial(5) / (factorial(2) * factorial(2))),
            // triple positions, triple face, two remaining distinct faces in order
            three_of_a_kind: choose(5, 3) * 6 * 5 * 4,
            // odd position, quad face, odd face
            four_of_a_kind: choose(5, 4) * 6 * 5,
        }
    }

    pub fn total(&self) -> u64 {
        self.one_pair + self.two_pair + self.three_of_a_kind + self.four_of_a_kind
    }
}

/// Exact number of outcomes per combination out of [`TOTAL_OUTCOMES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityModel {
    counts: [u64; 5],
}

impl ProbabilityModel {
    /// Counts from combinatorics, consistent with [`classify`]
    pub fn closed_form() -> Self {
        let balut = 6;
        // 1-5 and 2-6, each in any order
        let straight = factorial(5) + factorial(5);
        // positions of the triple, its face, the pair's face
        let full_house = choose(5, 3) * 6 * 5;
        let other = ALL_DISTINCT_OUTCOMES - straight;
        // everything with a repeated face that is neither Balut nor FullHouse
        let pair = TOTAL_OUTCOMES - (ALL_DISTINCT_OUTCOMES + balut + full_house);

        let mut counts = [0u64; 5];
        counts[CombinationCategory::Balut.index()] = balut;
        counts[CombinationCategory::Straight.index()] = straight;
        counts[CombinationCategory::FullHouse.index()] = full_house;
        counts[CombinationCategory::Pair.index()] = pair;
        counts[CombinationCategory::Other.index()] = other;
        Self { counts }
    }

    /// Counts obtained by classifying every outcome
    pub fn enumerate() -> Self {
        let mut counts = [0u64; 5];
        for roll in DiceRoll::all() {
            counts[classify(&roll).index()] += 1;
        }
        Self { counts }
    }

    /// Outcomes landing in a category
    pub fn count(&self, category: CombinationCategory) -> u64 {
        self.counts[category.index()]
    }

    /// Total outcomes covered (always 7776)
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Probability of a category
    pub fn probability(&self, category: CombinationCategory) -> f64 {
        self.count(category) as f64 / TOTAL_OUTCOMES as f64
    }

    /// (category, count, probability) in table order
    pub fn iter(&self) -> impl Iterator<Item = (CombinationCategory, u64, f64)> + '_ {
        CombinationCategory::ALL
            .into_iter()
            .map(|c| (c, self.count(c), self.probability(c)))
    }

    /// Check the counts cover the outcome space exactly once
    pub fn validate(&self) -> BalutResult<()> {
        let total = self.total();
        if total != TOTAL_OUTCOMES {
            return Err(BalutError::DegenerateConfiguration(format!(
                "category counts sum to {total}, expected {TOTAL_OUTCOMES}"
            )));
        }
        Ok(())
    }

    /// Outcome-weighted payout sum, Σ count · coefficient
    pub fn weighted_payout(&self, table: &CoefficientTable) -> f64 {
        CombinationCategory::ALL
            .iter()
            .map(|&c| self.count(c) as f64 * table.get(c))
            .sum()
    }

    /// Expected payout per unit staked
    pub fn expected_payout(&self, table: &CoefficientTable) -> f64 {
        self.weighted_payout(table) / TOTAL_OUTCOMES as f64
    }

    /// Expected payout as a percentage (theoretical RTP)
    pub fn rtp_percent(&self, table: &CoefficientTable) -> f64 {
        self.expected_payout(table) * 100.0
    }

    /// Variance of the payout per unit staked
    pub fn payout_variance(&self, table: &CoefficientTable) -> f64 {
        let mean = self.expected_payout(table);
        let second_moment: f64 = CombinationCategory::ALL
            .iter()
            .map(|&c| self.count(c) as f64 * table.get(c).powi(2))
            .sum::<f64>()
            / TOTAL_OUTCOMES as f64;
        (second_moment - mean * mean).max(0.0)
    }
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self::closed_form()
    }
}
