//! Cell-by-cell comparison of cropped `values` / `formulas` grids.

use sheetcheck_model::{formulas_equivalent, CellRef, CellValue, GridRange};

/// Which grid of the document a cell comparison reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridKind {
    Values,
    Formulas,
}

impl GridKind {
    pub fn noun(self) -> &'static str {
        match self {
            GridKind::Values => "values",
            GridKind::Formulas => "formulas",
        }
    }

    fn cells_match(self, expected: &CellValue, actual: &CellValue) -> bool {
        match (self, expected.as_formula(), actual.as_formula()) {
            (GridKind::Formulas, Some(expected), Some(actual)) => {
                formulas_equivalent(expected, actual)
            }
            _ => expected == actual,
        }
    }
}

/// One cell whose student content differs from the solution.
#[derive(Clone, Debug, PartialEq)]
pub struct CellMismatch {
    /// Absolute sheet position.
    pub cell: CellRef,
    pub expected: CellValue,
    pub actual: CellValue,
}

/// Every mismatch found in a grid comparison, in row-major order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridDiff {
    pub mismatches: Vec<CellMismatch>,
}

impl GridDiff {
    pub fn is_empty(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn first(&self) -> Option<&CellMismatch> {
        self.mismatches.first()
    }
}

/// Compare two grids already cropped to `range`.
///
/// The solution's shape drives the walk; student cells outside their cropped grid count as
/// empty, so a missing student row is reported cell by cell.
pub fn diff_grids(
    kind: GridKind,
    range: &GridRange,
    solution: &[Vec<CellValue>],
    student: &[Vec<CellValue>],
) -> GridDiff {
    let empty = CellValue::Empty;
    let mut mismatches = Vec::new();
    for (r, expected_row) in solution.iter().enumerate() {
        let actual_row = student.get(r);
        for (c, expected) in expected_row.iter().enumerate() {
            let actual = actual_row.and_then(|row| row.get(c)).unwrap_or(&empty);
            if kind.cells_match(expected, actual) {
                continue;
            }
            mismatches.push(CellMismatch {
                cell: CellRef::new(offset(range.start_row, r), offset(range.start_col, c)),
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }
    }
    GridDiff { mismatches }
}

fn offset(start: u32, index: usize) -> u32 {
    start.saturating_add(u32::try_from(index).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetcheck_model::resolve_range;

    fn row(cells: &[CellValue]) -> Vec<CellValue> {
        cells.to_vec()
    }

    #[test]
    fn identical_grids_have_no_mismatches() {
        let grid = vec![row(&[1.0.into(), "a".into()]), row(&[true.into(), CellValue::Empty])];
        let range = resolve_range("A1:B2").unwrap();
        assert!(diff_grids(GridKind::Values, &range, &grid, &grid).is_empty());
    }

    #[test]
    fn mismatches_carry_absolute_cells_in_row_major_order() {
        let range = resolve_range("B2:C3").unwrap();
        let solution = vec![row(&[1.0.into(), 2.0.into()]), row(&[3.0.into(), 4.0.into()])];
        let student = vec![row(&[1.0.into(), 5.0.into()]), row(&[6.0.into(), 4.0.into()])];

        let diff = diff_grids(GridKind::Values, &range, &solution, &student);
        let cells: Vec<String> = diff.mismatches.iter().map(|m| m.cell.to_a1()).collect();
        assert_eq!(cells, vec!["C2", "B3"]);
        assert_eq!(
            diff.first(),
            Some(&CellMismatch {
                cell: CellRef::new(1, 2),
                expected: 2.0.into(),
                actual: 5.0.into(),
            })
        );
    }

    #[test]
    fn short_student_grid_counts_as_empty_cells() {
        let range = resolve_range("A1:B2").unwrap();
        let solution = vec![row(&[1.0.into(), 2.0.into()]), row(&[3.0.into(), 4.0.into()])];
        let student = vec![row(&[1.0.into()])];

        let diff = diff_grids(GridKind::Values, &range, &solution, &student);
        assert_eq!(diff.mismatches.len(), 3);
        assert!(diff.mismatches.iter().all(|m| m.actual.is_empty()));
    }

    #[test]
    fn formulas_compare_by_normalized_text() {
        let range = resolve_range("A1:B1").unwrap();
        let solution = vec![row(&["=SUM(A2:A9)".into(), 3.0.into()])];
        let student = vec![row(&["= sum( a2:a9 )".into(), 3.0.into()])];
        assert!(diff_grids(GridKind::Formulas, &range, &solution, &student).is_empty());

        let student = vec![row(&["=SUM(A2:A8)".into(), 3.0.into()])];
        assert_eq!(
            diff_grids(GridKind::Formulas, &range, &solution, &student)
                .mismatches
                .len(),
            1
        );
    }

    #[test]
    fn value_grids_compare_formula_text_literally() {
        let range = resolve_range("A1").unwrap();
        let solution = vec![row(&["=SUM(A2:A9)".into()])];
        let student = vec![row(&["=sum(A2:A9)".into()])];
        assert_eq!(
            diff_grids(GridKind::Values, &range, &solution, &student)
                .mismatches
                .len(),
            1
        );
    }
}
