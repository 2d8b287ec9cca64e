//! Provides some commonly needed board math.

use crate::prelude::*;
use itertools::Itertools;

/// Returns the default region assignments for a board of the given size.
///
/// This is a flat row-major list of which region index each cell belongs to.
/// Regions are as close to square as the size allows; non-square sizes fall
/// back to wide boxes (e.g. 2x3 boxes for a 6x6 grid).
///
/// # Example
/// ```
/// # use sudoku_variants_lib::math::default_regions;
/// let regions = default_regions(6);
/// assert_eq!(regions.len(), 36);
/// assert_eq!(regions, vec![
///     0, 0, 0, 1, 1, 1,
///     0, 0, 0, 1, 1, 1,
///     2, 2, 2, 3, 3, 3,
///     2, 2, 2, 3, 3, 3,
///     4, 4, 4, 5, 5, 5,
///     4, 4, 4, 5, 5, 5,
/// ]);
/// ```
pub fn default_regions(size: usize) -> Vec<usize> {
    if size == 0 {
        return Vec::new();
    }

    let mut regions = Vec::with_capacity(size * size);

    let mut region_height = (size as f64).sqrt().floor() as usize;
    while size % region_height != 0 {
        region_height -= 1;
    }

    let region_width = size / region_height;
    for i in 0..size {
        for j in 0..size {
            regions.push((i / region_height) * region_height + (j / region_width));
        }
    }

    regions
}

/// Generates the weak links for a group of cells in which values cannot
/// repeat: every same-value candidate pair within the group.
pub fn weak_links_for_nonrepeat(
    size: usize,
    group: impl Iterator<Item = CellIndex> + Clone,
) -> Vec<(CandidateIndex, CandidateIndex)> {
    group
        .tuple_combinations()
        .flat_map(move |(cell1, cell2)| {
            (1..=size).map(move |value| (cell1.candidate(value), cell2.candidate(value)))
        })
        .collect()
}
