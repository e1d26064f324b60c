//! Submission checks for spreadsheet exercises.
//!
//! A check compares a student's spreadsheet with the solution over one A1 range and, on the
//! first difference, hands a single feedback sentence to a [`Reporter`]. Pivot tables are
//! compared structurally (source, rows, columns, values, filters) rather than by their
//! rendered output, so a pivot that happens to show the same numbers for the wrong reason
//! is still rejected.

mod checks;
pub mod cli;
mod error;
mod exercise;
pub mod feedback;
mod grid_diff;
pub mod pivot_diff;
mod state;

pub use checks::{has_equal_formula, has_equal_pivot, has_equal_value, DocumentState};
pub use error::CheckError;
pub use exercise::{run_exercise, CheckName, Directive, ExerciseResult};
pub use grid_diff::{diff_grids, CellMismatch, GridDiff, GridKind};
pub use pivot_diff::{compare_pivots, CompareOptions, PivotIssue, ValueCountMode};
pub use state::{FirstFailureReporter, Outcome, Reporter, State};

pub use sheetcheck_model::SpreadsheetDocument;
