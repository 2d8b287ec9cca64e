//! Contains the [`ConstraintRegistry`], which maps constraint names to
//! builders that parse an options string into constraint instances.
//!
//! Every constraint registers two names: a short console name (`killer`)
//! and a long name (`Killer Cage`). Either resolves it, case-insensitively.
//! Registering a name twice logs a warning and keeps the first entry.

use std::sync::Arc;

use crate::prelude::*;
use regex::Regex;
use sudoku_variants_lib::prelude::*;

type BuildFn =
    Box<dyn Fn(usize, &str) -> Result<Vec<Arc<dyn Constraint>>, SolverError> + Send + Sync>;

struct RegistryEntry {
    console_name: String,
    long_name: String,
    build: BuildFn,
}

/// A name-indexed collection of constraint builders.
pub struct ConstraintRegistry {
    entries: Vec<RegistryEntry>,
}

impl ConstraintRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Creates a registry with all the standard constraints registered.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register("king", "Anti-King", |_, _| {
            Ok(vec![Arc::new(ChessConstraint::anti_king())])
        });
        registry.register("knight", "Anti-Knight", |_, _| {
            Ok(vec![Arc::new(ChessConstraint::anti_knight())])
        });
        registry.register("nc", "Nonconsecutive", |size, _| {
            Ok(vec![Arc::new(OrthogonalPairsConstraint::from_standard_markers(
                size,
                "Nonconsecutive",
                &[],
                &[StandardPairType::Diff(1)],
            ))])
        });
        registry.register("dnc", "Diagonal Nonconsecutive", |_, _| {
            Ok(vec![Arc::new(DiagonalPairsConstraint::nonconsecutive())])
        });
        registry.register("dp", "Diagonal+", |size, _| {
            Ok(vec![Arc::new(NonRepeatConstraint::from_diagonalp(size))])
        });
        registry.register("dn", "Diagonal-", |size, _| {
            Ok(vec![Arc::new(NonRepeatConstraint::from_diagonaln(size))])
        });
        registry.register("extraregion", "Extra Region", |size, options| {
            let groups = CellUtility::new(size).parse_cell_groups(options)?;
            let mut constraints: Vec<Arc<dyn Constraint>> = Vec::new();
            for (index, cells) in groups.into_iter().enumerate() {
                if cells.len() != size {
                    return Err(SolverError::invalid_options(
                        "extraregion",
                        format!("region must have exactly {} cells", size),
                    ));
                }
                constraints.push(Arc::new(NonRepeatConstraint::extra_region(index, cells)));
            }
            Ok(constraints)
        });
        registry.register("killer", "Killer Cage", |size, options| {
            let cu = CellUtility::new(size);
            let (cells_text, sum_text) = match options.split_once(':') {
                Some((cells_text, sum_text)) => (cells_text, Some(sum_text)),
                None => (options, None),
            };
            let sum = match sum_text {
                Some(text) => Some(text.trim().parse::<usize>().map_err(|_| {
                    SolverError::invalid_options("killer", format!("invalid sum '{}'", text))
                })?),
                None => None,
            };
            let mut constraints: Vec<Arc<dyn Constraint>> = Vec::new();
            for cells in cu.parse_cell_groups(cells_text)? {
                constraints.push(Arc::new(KillerCageConstraint::new(cells, sum)));
            }
            if constraints.is_empty() {
                return Err(SolverError::invalid_options("killer", "no cage cells given"));
            }
            Ok(constraints)
        });
        registry.register("arrow", "Arrow", |size, options| {
            let groups = CellUtility::new(size).parse_cell_groups(options)?;
            if groups.len() != 2 {
                return Err(SolverError::invalid_options(
                    "arrow",
                    "expected 'circle;shaft' cell groups",
                ));
            }
            let mut groups = groups.into_iter();
            let circle = groups.next().unwrap_or_default();
            let shaft = groups.next().unwrap_or_default();
            Ok(vec![Arc::new(ArrowSumConstraint::new(circle, shaft))])
        });
        registry.register("difference", "Difference", |size, options| {
            build_pairs_constraint(size, "Difference", options, StandardPairType::Diff)
        });
        registry.register("ratio", "Ratio", |size, options| {
            build_pairs_constraint(size, "Ratio", options, StandardPairType::Ratio)
        });

        registry
    }

    /// Registers a constraint under a console name and a long name. The
    /// first registration of a name wins; later ones are ignored with a
    /// warning.
    pub fn register(
        &mut self,
        console_name: &str,
        long_name: &str,
        build: impl Fn(usize, &str) -> Result<Vec<Arc<dyn Constraint>>, SolverError>
            + Send
            + Sync
            + 'static,
    ) {
        let conflict = self.entries.iter().any(|entry| {
            entry.console_name.eq_ignore_ascii_case(console_name)
                || entry.long_name.eq_ignore_ascii_case(long_name)
        });
        if conflict {
            tracing::warn!(console_name, long_name, "duplicate constraint registration ignored");
            return;
        }

        self.entries.push(RegistryEntry {
            console_name: console_name.to_owned(),
            long_name: long_name.to_owned(),
            build: Box::new(build),
        });
    }

    /// Builds constraint instances by name from an options string.
    pub fn build(
        &self,
        size: usize,
        name: &str,
        options: &str,
    ) -> Result<Vec<Arc<dyn Constraint>>, SolverError> {
        let entry = self
            .entries
            .iter()
            .find(|entry| {
                entry.console_name.eq_ignore_ascii_case(name)
                    || entry.long_name.eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| SolverError::UnknownConstraint(name.to_owned()))?;
        (entry.build)(size, options)
    }

    /// Iterates the registered (console, long) name pairs.
    pub fn names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|entry| (entry.console_name.as_str(), entry.long_name.as_str()))
    }
}

impl Default for ConstraintRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// Shared parser for difference/ratio options: "pairs:values", where pairs
// are two-cell groups, and values are numbers or `negN` for the negative
// form, e.g. "r1c1r1c2:2" or "neg1".
fn build_pairs_constraint(
    size: usize,
    name: &str,
    options: &str,
    make_type: impl Fn(usize) -> StandardPairType,
) -> Result<Vec<Arc<dyn Constraint>>, SolverError> {
    let neg_pattern = Regex::new(r"^neg(\d+)$").map_err(|_| {
        SolverError::invalid_options(name, "internal pattern error")
    })?;

    let (cells_text, values_text) = match options.split_once(':') {
        Some((cells_text, values_text)) => (cells_text, values_text),
        None => match options.trim() {
            text if neg_pattern.is_match(text) => ("", text),
            text => (text, ""),
        },
    };

    let mut marker_value: Option<usize> = None;
    let mut negative_values: Vec<usize> = Vec::new();
    for token in values_text.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        if let Some(captures) = neg_pattern.captures(token) {
            let value = captures[1].parse::<usize>().map_err(|_| {
                SolverError::invalid_options(name, format!("invalid token '{}'", token))
            })?;
            negative_values.push(value);
        } else {
            let value = token.parse::<usize>().map_err(|_| {
                SolverError::invalid_options(name, format!("invalid token '{}'", token))
            })?;
            marker_value = Some(value);
        }
    }

    let cu = CellUtility::new(size);
    let mut markers = Vec::new();
    for cells in cu.parse_cell_groups(cells_text)? {
        if cells.len() != 2 || !cells[0].is_orthogonally_adjacent(cells[1]) {
            return Err(SolverError::invalid_options(
                name,
                "each marker must be two orthogonally adjacent cells",
            ));
        }
        markers.push(StandardOrthogonalPairsMarker::new(
            make_type(marker_value.unwrap_or(1)),
            cells[0],
            cells[1],
        ));
    }

    let negative_constraints: Vec<StandardPairType> =
        negative_values.into_iter().map(&make_type).collect();

    if markers.is_empty() && negative_constraints.is_empty() {
        return Err(SolverError::invalid_options(name, "no markers or negative values given"));
    }

    Ok(vec![Arc::new(OrthogonalPairsConstraint::from_standard_markers(
        size,
        name,
        &markers,
        &negative_constraints,
    ))])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build_killer() {
        let registry = ConstraintRegistry::standard();
        let constraints = registry.build(9, "killer", "r1c1r1c2:3").unwrap();
        assert_eq!(constraints.len(), 1);

        let solver =
            SolverBuilder::default().with_constraints(constraints).build().unwrap();
        let cu = solver.cell_utility();
        assert_eq!(
            solver.board().cell(cu.cell(0, 0)).unsolved(),
            ValueMask::from_values(&[1, 2])
        );
    }

    #[test]
    fn test_build_by_long_name() {
        let registry = ConstraintRegistry::standard();
        let constraints = registry.build(9, "Anti-Knight", "").unwrap();
        assert_eq!(constraints[0].name(), "Anti-Knight");
    }

    #[test]
    fn test_unknown_constraint() {
        let registry = ConstraintRegistry::standard();
        let result = registry.build(9, "nope", "");
        assert_eq!(result.err(), Some(SolverError::UnknownConstraint("nope".to_owned())));
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let mut registry = ConstraintRegistry::standard();
        registry.register("killer", "Killer Cage Again", |_, _| {
            Ok(vec![Arc::new(ChessConstraint::anti_king())])
        });

        let constraints = registry.build(9, "killer", "r1c1r1c2:3").unwrap();
        assert!(constraints[0].name().starts_with("Killer Cage"));
    }

    #[test]
    fn test_negative_difference() {
        let registry = ConstraintRegistry::standard();
        let constraints = registry.build(9, "difference", "neg1").unwrap();
        let solver = SolverBuilder::default()
            .with_constraints(constraints)
            .with_givens_string(
                "5................................................................................",
            )
            .build()
            .unwrap();
        let cu = solver.cell_utility();
        assert!(!solver.board().cell(cu.cell(0, 1)).has(4));
        assert!(!solver.board().cell(cu.cell(0, 1)).has(6));
        assert!(!solver.board().cell(cu.cell(1, 0)).has(4));
    }

    #[test]
    fn test_build_arrow() {
        let registry = ConstraintRegistry::standard();
        let constraints = registry.build(9, "arrow", "r1c1;r1c2r1c3").unwrap();
        assert_eq!(constraints[0].name(), "Arrow at r1c1");
    }
}
