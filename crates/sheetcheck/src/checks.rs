//! Submission checks run against a [`State`] over two spreadsheet documents.
//!
//! A check returns `Ok(Outcome::Failed)` after reporting feedback for a student mistake and
//! `Err(CheckError)` when the exercise itself cannot be checked.

use sheetcheck_model::{resolve_range, GridRange, SpreadsheetDocument};

use crate::error::CheckError;
use crate::feedback::{render_cell_issues, render_missing_pivot, render_pivot_issue};
use crate::grid_diff::{diff_grids, GridKind};
use crate::pivot_diff::{compare_pivots, CompareOptions};
use crate::state::{Outcome, State};

/// Documents under test at the top level of an exercise.
pub type DocumentState<'r, 'd> = State<'r, &'d SpreadsheetDocument>;

fn state_range<D>(state: &State<'_, D>) -> Result<GridRange, CheckError> {
    resolve_range(state.range()).map_err(|err| CheckError::malformed_range(state.range(), err))
}

fn report<D>(state: &State<'_, D>, message: &str) -> Outcome {
    state.report_result(message);
    Outcome::Failed
}

/// The student's pivot table at the range's top-left cell must match the solution's.
pub fn has_equal_pivot(
    state: &DocumentState<'_, '_>,
    options: &CompareOptions,
) -> Result<Outcome, CheckError> {
    let range = state_range(state)?;
    let anchor = range.start();

    let Some(student) = state.student_data.pivot_table_at(anchor) else {
        log::debug!("no student pivot table at {anchor}");
        return Ok(report(state, &render_missing_pivot(state.range())));
    };
    let solution = state.solution_data.pivot_table_at(anchor).ok_or_else(|| {
        CheckError::MissingSolutionPivot {
            range: state.range().to_string(),
        }
    })?;
    log::debug!("comparing pivot tables at {anchor}");

    let pivots = state.derive_child(student, solution);
    match compare_pivots(pivots.solution_data, pivots.student_data, options) {
        None => Ok(Outcome::Passed),
        Some(issue) => Ok(report(&pivots, &render_pivot_issue(&issue, pivots.range()))),
    }
}

/// The displayed values in the range must match the solution's.
pub fn has_equal_value(state: &DocumentState<'_, '_>) -> Result<Outcome, CheckError> {
    has_equal_cells(state, GridKind::Values)
}

/// The formulas in the range must match the solution's, up to formula normalization.
pub fn has_equal_formula(state: &DocumentState<'_, '_>) -> Result<Outcome, CheckError> {
    has_equal_cells(state, GridKind::Formulas)
}

fn has_equal_cells(state: &DocumentState<'_, '_>, kind: GridKind) -> Result<Outcome, CheckError> {
    let range = state_range(state)?;
    let (student, solution) = match kind {
        GridKind::Values => (
            state.student_data.values_in(&range),
            state.solution_data.values_in(&range),
        ),
        GridKind::Formulas => (
            state.student_data.formulas_in(&range),
            state.solution_data.formulas_in(&range),
        ),
    };

    let cells = state.derive_child(student, solution);
    let diff = diff_grids(kind, &range, &cells.solution_data, &cells.student_data);
    match diff.first() {
        None => Ok(Outcome::Passed),
        Some(first) => {
            let message = render_cell_issues(kind, diff.mismatches.len(), first, cells.range());
            Ok(report(&cells, &message))
        }
    }
}
