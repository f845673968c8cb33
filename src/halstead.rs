//! Halstead operand/operator accumulation and the derived software-science
//! scalars (length, vocabulary, difficulty, volume, effort, bugs, time).

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Which Halstead multiset an encountered token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Operators: `+`, `=`, `if`, keywords, punctuation.
    Operators,
    /// Operands: identifiers, literals.
    Operands,
}

/// A single Halstead multiset: a count of distinct identifiers alongside the
/// total number of times any identifier (distinct or not) was encountered.
///
/// `identifiers` preserves first-seen order so that aggregates built by
/// unioning member bags (see [`crate::module_report::ModuleReport`]) are
/// reproducible regardless of iteration order elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HalsteadBag {
    /// Number of distinct identifiers seen. Always equal to
    /// `identifiers.len()`.
    pub distinct: u32,
    /// Total number of identifiers seen, counting repeats.
    pub total: u32,
    identifiers: IndexSet<String>,
}

impl HalsteadBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `identifier`. If it has not been seen
    /// before in this bag, it is appended to the identifier set (in
    /// first-seen order) and `distinct` is incremented; `total` is always
    /// incremented.
    pub fn encounter(&mut self, identifier: &str) {
        if self.identifiers.insert(identifier.to_string()) {
            self.distinct += 1;
        }
        self.total += 1;
    }

    /// Merges `other` into `self`: identifiers from `other` not already
    /// present are appended in `other`'s first-seen order, and totals sum.
    pub fn merge(&mut self, other: &HalsteadBag) {
        for id in &other.identifiers {
            if self.identifiers.insert(id.clone()) {
                self.distinct += 1;
            }
        }
        self.total += other.total;
    }

    /// Returns whether `identifier` has already been recorded in this bag.
    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }
}

/// The two Halstead multisets for one lexical scope, plus the derived
/// software-science scalars. The derived fields are zero until
/// [`HalsteadPair::finalize`] is called.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HalsteadPair {
    pub operators: HalsteadBag,
    pub operands: HalsteadBag,
    pub length: u32,
    pub vocabulary: u32,
    pub difficulty: f64,
    pub volume: f64,
    pub effort: f64,
    pub bugs: f64,
    pub time: f64,
}

impl HalsteadPair {
    /// Creates an empty pair.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `identifier` in the bag named by `metric`.
    pub fn encounter(&mut self, metric: Metric, identifier: &str) {
        match metric {
            Metric::Operators => self.operators.encounter(identifier),
            Metric::Operands => self.operands.encounter(identifier),
        }
    }

    /// Merges both bags of `other` into `self`.
    pub fn merge(&mut self, other: &HalsteadPair) {
        self.operators.merge(&other.operators);
        self.operands.merge(&other.operands);
    }

    /// Computes `length`, `vocabulary`, `difficulty`, `volume`, `effort`,
    /// `bugs` and `time` from the accumulated bags (spec.md §4.4).
    ///
    /// When `length` is zero all derived scalars are defined to be zero
    /// (rather than the `NaN`/`inf` that `log2(0)` or division by zero would
    /// otherwise produce).
    pub fn finalize(&mut self) {
        self.length = self.operators.total + self.operands.total;
        if self.length == 0 {
            self.vocabulary = 0;
            self.difficulty = 0.0;
            self.volume = 0.0;
            self.effort = 0.0;
            self.bugs = 0.0;
            self.time = 0.0;
            return;
        }

        self.vocabulary = self.operators.distinct + self.operands.distinct;
        let operand_ratio = if self.operands.distinct == 0 {
            1.0
        } else {
            f64::from(self.operands.total) / f64::from(self.operands.distinct)
        };
        self.difficulty = (f64::from(self.operators.distinct) / 2.0) * operand_ratio;
        self.volume = f64::from(self.length) * (f64::from(self.vocabulary)).log2();
        self.effort = self.difficulty * self.volume;
        self.bugs = self.volume / 3000.0;
        self.time = self.effort / 18.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bag_distinct_tracks_identifier_count() {
        let mut bag = HalsteadBag::new();
        bag.encounter("x");
        bag.encounter("y");
        bag.encounter("x");
        assert_eq!(bag.distinct, 2);
        assert_eq!(bag.total, 3);
        assert!(bag.contains("x"));
        assert!(!bag.contains("z"));
    }

    #[test]
    fn bag_merge_preserves_first_seen_order_and_sums_totals() {
        let mut a = HalsteadBag::new();
        a.encounter("x");
        a.encounter("y");
        let mut b = HalsteadBag::new();
        b.encounter("y");
        b.encounter("z");
        a.merge(&b);
        assert_eq!(a.distinct, 3);
        assert_eq!(a.total, 4);
    }

    #[test]
    fn finalize_on_empty_pair_is_all_zero() {
        let mut pair = HalsteadPair::new();
        pair.finalize();
        assert_eq!(pair.length, 0);
        assert_eq!(pair.vocabulary, 0);
        assert_eq!(pair.difficulty, 0.0);
        assert_eq!(pair.volume, 0.0);
        assert_eq!(pair.effort, 0.0);
        assert_eq!(pair.bugs, 0.0);
        assert_eq!(pair.time, 0.0);
    }

    /// spec.md §8 scenario 2: two operators, three operands.
    #[test]
    fn finalize_matches_worked_example() {
        let mut pair = HalsteadPair::new();
        pair.encounter(Metric::Operators, "+");
        pair.encounter(Metric::Operators, "=");
        pair.encounter(Metric::Operands, "x");
        pair.encounter(Metric::Operands, "y");
        pair.encounter(Metric::Operands, "1");
        pair.finalize();

        assert_eq!(pair.length, 5);
        assert_eq!(pair.vocabulary, 5);
        assert!((pair.difficulty - 1.0).abs() < 1e-9);
        let expected_volume = 5.0 * 5f64.log2();
        assert!((pair.volume - expected_volume).abs() < 1e-9);
        assert!((pair.effort - expected_volume).abs() < 1e-9);
        assert!((pair.bugs - expected_volume / 3000.0).abs() < 1e-9);
        assert!((pair.time - expected_volume / 18.0).abs() < 1e-9);
    }

    #[test]
    fn difficulty_with_zero_distinct_operands_treats_ratio_as_one() {
        let mut pair = HalsteadPair::new();
        pair.encounter(Metric::Operators, "+");
        pair.finalize();
        // operators.distinct = 1, operands.distinct = 0 -> difficulty = 0.5 * 1
        assert!((pair.difficulty - 0.5).abs() < 1e-9);
    }
}
