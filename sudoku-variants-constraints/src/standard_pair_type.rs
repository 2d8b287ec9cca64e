//! Contains the [`StandardPairType`] enum for the common adjacent-pair
//! predicates.

use sudoku_variants_lib::prelude::*;

/// The standard predicates for pair constraints: sums (XV), differences
/// (white kropki, nonconsecutive), and ratios (black kropki).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardPairType {
    /// The two cells sum to the given value.
    Sum(usize),
    /// The two cells differ by the given value.
    Diff(usize),
    /// One cell is the given multiple of the other.
    Ratio(usize),
}

impl StandardPairType {
    /// The short type tag used to key candidate-pair tables.
    pub fn name(&self) -> String {
        match self {
            Self::Sum(n) => format!("s{n}"),
            Self::Diff(n) => format!("d{n}"),
            Self::Ratio(n) => format!("r{n}"),
        }
    }

    /// For each value, the mask of partner values satisfying the predicate.
    pub fn candidate_pairs(&self, size: usize) -> Vec<ValueMask> {
        let allowed: Box<dyn Fn(usize, usize) -> bool> = match self {
            Self::Sum(n) => {
                let n = *n;
                Box::new(move |a, b| a + b == n)
            }
            Self::Diff(n) => {
                let n = *n;
                Box::new(move |a, b| a + n == b || b + n == a)
            }
            Self::Ratio(n) => {
                let n = *n;
                Box::new(move |a, b| a * n == b || b * n == a)
            }
        };

        (1..=size)
            .map(|value| (1..=size).filter(|&other| allowed(value, other)).collect())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_candidate_pairs() {
        let sums = StandardPairType::Sum(10).candidate_pairs(9);
        assert_eq!(sums[0], ValueMask::from_value(9));
        assert_eq!(sums[4], ValueMask::from_value(5));

        let diffs = StandardPairType::Diff(1).candidate_pairs(9);
        assert_eq!(diffs[0], ValueMask::from_value(2));
        assert_eq!(diffs[4], ValueMask::from_values(&[4, 6]));

        let ratios = StandardPairType::Ratio(2).candidate_pairs(9);
        assert_eq!(ratios[0], ValueMask::from_value(2));
        assert_eq!(ratios[3], ValueMask::from_values(&[2, 8]));
        assert_eq!(ratios[8], ValueMask::new());
    }
}
