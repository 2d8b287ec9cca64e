//! Contains the [`OrthogonalPairsConstraint`] struct for constraints on
//! which value combinations orthogonally adjacent cells may hold.

use std::collections::{HashMap, HashSet};

use crate::standard_pair_type::StandardPairType;
use sudoku_variants_lib::prelude::*;

/// A [`Constraint`] for adjacent-pair rules: consecutive/nonconsecutive,
/// kropki dots, XV, and their negative forms.
///
/// Markers pin a predicate onto specific adjacent pairs; negative
/// constraints forbid the predicate on every unmarked pair. Everything is
/// expressed as weak links, so the solver needs no pair-specific step logic.
#[derive(Debug)]
pub struct OrthogonalPairsConstraint {
    specific_name: String,
    markers: Vec<OrthogonalPairsMarker>,
    negative_constraints: Vec<String>,
    candidate_pairs: HashMap<String, Vec<ValueMask>>,
}

impl OrthogonalPairsConstraint {
    /// Creates a new [`OrthogonalPairsConstraint`] from precomputed
    /// candidate-pair tables.
    pub fn new_with_candidate_pairs(
        specific_name: &str,
        markers: Vec<OrthogonalPairsMarker>,
        negative_constraints: &[&str],
        candidate_pairs: HashMap<String, Vec<ValueMask>>,
    ) -> Self {
        Self {
            specific_name: specific_name.to_owned(),
            markers,
            negative_constraints: negative_constraints.iter().map(|&s| s.to_owned()).collect(),
            candidate_pairs,
        }
    }

    /// Creates a new [`OrthogonalPairsConstraint`] from standard marker
    /// types.
    pub fn from_standard_markers(
        size: usize,
        specific_name: &str,
        standard_markers: &[StandardOrthogonalPairsMarker],
        negative_constraints: &[StandardPairType],
    ) -> Self {
        let mut markers = Vec::new();
        let mut candidate_pairs = HashMap::new();

        for &marker in standard_markers {
            let type_name = marker.marker_type.name();
            candidate_pairs
                .entry(type_name)
                .or_insert_with(|| marker.marker_type.candidate_pairs(size));
            markers.push(marker.into());
        }
        for pair_type in negative_constraints {
            candidate_pairs
                .entry(pair_type.name())
                .or_insert_with(|| pair_type.candidate_pairs(size));
        }

        let negative_constraints: Vec<String> =
            negative_constraints.iter().map(|pair_type| pair_type.name()).collect();
        let negative_constraints: Vec<&str> =
            negative_constraints.iter().map(|name| name.as_str()).collect();

        Self::new_with_candidate_pairs(specific_name, markers, &negative_constraints, candidate_pairs)
    }
}

impl Constraint for OrthogonalPairsConstraint {
    fn name(&self) -> &str {
        &self.specific_name
    }

    fn get_weak_links(&self, board: &Board) -> Vec<(CandidateIndex, CandidateIndex)> {
        let size = board.size();
        let cu = board.cell_utility();

        let mut result = Vec::new();

        let mut marked_pairs = HashSet::new();
        for marker in &self.markers {
            if !self.negative_constraints.is_empty() {
                let (low, high) = if marker.cell0 < marker.cell1 {
                    (marker.cell0, marker.cell1)
                } else {
                    (marker.cell1, marker.cell0)
                };
                marked_pairs.insert((low, high));
            }

            let Some(candidate_pairs) = self.candidate_pairs.get(marker.marker_type.as_str())
            else {
                continue;
            };
            for value in 1..=size {
                let mask = candidate_pairs[value - 1].without(value);
                if mask.is_empty() {
                    // The value cannot sit on this marker at all.
                    result.push((marker.cell0.candidate(value), marker.cell0.candidate(value)));
                    result.push((marker.cell1.candidate(value), marker.cell1.candidate(value)));
                }

                let forbidden = !mask & ValueMask::from_all_values(size);
                for other_value in forbidden {
                    result.push((marker.cell0.candidate(value), marker.cell1.candidate(other_value)));
                    result.push((marker.cell1.candidate(value), marker.cell0.candidate(other_value)));
                }
            }
        }

        if !self.negative_constraints.is_empty() {
            // Off-marker pairs must avoid every negative predicate.
            let mut combined = vec![ValueMask::new(); size];
            for name in self.negative_constraints.iter() {
                if let Some(candidate_pairs) = self.candidate_pairs.get(name.as_str()) {
                    for value in 1..=size {
                        combined[value - 1] = combined[value - 1] | candidate_pairs[value - 1];
                    }
                }
            }

            for cell0 in cu.all_cells() {
                for cell1 in cell0.orthogonally_adjacent_cells() {
                    if cell0 > cell1 || marked_pairs.contains(&(cell0, cell1)) {
                        continue;
                    }

                    for value in 1..=size {
                        let mask = combined[value - 1].without(value);
                        let allowed = !mask & ValueMask::from_all_values(size);
                        if allowed.is_empty() {
                            // The value has no legal neighbor off a marker.
                            result.push((cell0.candidate(value), cell0.candidate(value)));
                            result.push((cell1.candidate(value), cell1.candidate(value)));
                        }

                        for other_value in mask {
                            result.push((cell0.candidate(value), cell1.candidate(other_value)));
                            result.push((cell1.candidate(value), cell0.candidate(other_value)));
                        }
                    }
                }
            }
        }

        result
    }
}

/// One marker between two adjacent cells, keyed by a marker type name.
#[derive(Debug, Clone)]
pub struct OrthogonalPairsMarker {
    marker_type: String,
    cell0: CellIndex,
    cell1: CellIndex,
}

impl OrthogonalPairsMarker {
    pub fn new(marker_type: &str, cell0: CellIndex, cell1: CellIndex) -> Self {
        Self { marker_type: marker_type.to_owned(), cell0, cell1 }
    }
}

/// A marker restricted to the standard pair types, convertible into
/// [`OrthogonalPairsMarker`].
#[derive(Debug, Clone, Copy)]
pub struct StandardOrthogonalPairsMarker {
    marker_type: StandardPairType,
    cell0: CellIndex,
    cell1: CellIndex,
}

impl StandardOrthogonalPairsMarker {
    pub fn new(marker_type: StandardPairType, cell0: CellIndex, cell1: CellIndex) -> Self {
        Self { marker_type, cell0, cell1 }
    }

    pub fn sum(sum: usize, cell0: CellIndex, cell1: CellIndex) -> Self {
        Self::new(StandardPairType::Sum(sum), cell0, cell1)
    }

    pub fn difference(difference: usize, cell0: CellIndex, cell1: CellIndex) -> Self {
        Self::new(StandardPairType::Diff(difference), cell0, cell1)
    }

    pub fn ratio(ratio: usize, cell0: CellIndex, cell1: CellIndex) -> Self {
        Self::new(StandardPairType::Ratio(ratio), cell0, cell1)
    }

    pub fn marker_type(&self) -> StandardPairType {
        self.marker_type
    }

    pub fn cell0(&self) -> CellIndex {
        self.cell0
    }

    pub fn cell1(&self) -> CellIndex {
        self.cell1
    }
}

impl From<StandardOrthogonalPairsMarker> for OrthogonalPairsMarker {
    fn from(marker: StandardOrthogonalPairsMarker) -> Self {
        Self::new(&marker.marker_type.name(), marker.cell0, marker.cell1)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_sum_marker() {
        let size = 9;
        let cu = CellUtility::new(size);
        let cell0 = cu.cell(0, 0);
        let cell1 = cu.cell(0, 1);

        let marker = StandardOrthogonalPairsMarker::sum(10, cell0, cell1);
        let xv_constraint = Arc::new(OrthogonalPairsConstraint::from_standard_markers(
            size,
            "XV",
            &[marker],
            &[],
        ));

        let solver =
            SolverBuilder::default().with_constraint(xv_constraint.clone()).build().unwrap();
        // 5+5 would repeat within the row, so 5 is impossible on the marker.
        assert_eq!(solver.board().cell(cell0).count(), size - 1);
        assert!(!solver.board().cell(cell0).has(5));
        assert!(!solver.board().cell(cell1).has(5));

        // A given on one end resolves the other.
        let solver = SolverBuilder::default()
            .with_constraint(xv_constraint)
            .with_given(cell0, 2)
            .build()
            .unwrap();
        assert_eq!(solver.board().cell(cell1).value(), 8);
        assert!(solver.board().cell(cell1).is_solved());

        // A sum of 5 keeps both ends at 4 or below.
        let marker = StandardOrthogonalPairsMarker::sum(5, cell0, cell1);
        let xv_constraint = Arc::new(OrthogonalPairsConstraint::from_standard_markers(
            size,
            "XV",
            &[marker],
            &[],
        ));
        let solver = SolverBuilder::default().with_constraint(xv_constraint).build().unwrap();
        assert_eq!(solver.board().cell(cell0), ValueMask::from_lower_equal(4));
        assert_eq!(solver.board().cell(cell1), ValueMask::from_lower_equal(4));
    }

    #[test]
    fn test_negative_nonconsecutive() {
        let size = 9;
        let cu = CellUtility::new(size);
        let constraint = Arc::new(OrthogonalPairsConstraint::from_standard_markers(
            size,
            "Nonconsecutive",
            &[],
            &[StandardPairType::Diff(1)],
        ));
        let solver = SolverBuilder::default()
            .with_constraint(constraint)
            .with_given(cu.cell(4, 4), 5)
            .build()
            .unwrap();

        // Orthogonal neighbors of the 5 lose 4 and 6.
        for cell in cu.cell(4, 4).orthogonally_adjacent_cells() {
            assert!(!solver.board().cell(cell).has(4), "{} should not allow 4", cell);
            assert!(!solver.board().cell(cell).has(6), "{} should not allow 6", cell);
        }
        // A diagonal neighbor is unaffected.
        assert!(solver.board().cell(cu.cell(3, 3)).has(4));
        assert!(solver.board().cell(cu.cell(3, 3)).has(6));
    }
}
