//! Turns diagnostics into the sentences shown to students.
//!
//! Every message names the range under test in backticks and starts with an issue count,
//! e.g. "1 issue with the pivot table in range `A1`: There are no filters."

use sheetcheck_model::pivots::PivotAxis;
use sheetcheck_model::{col_to_name, CellValue};

use crate::grid_diff::{CellMismatch, GridKind};
use crate::pivot_diff::{FilterTarget, GroupingMismatch, PivotIssue, ValueMismatch};

/// English ordinal for a 1-based position (`1st`, `2nd`, `3rd`, `11th`, `22nd`).
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// `1 issue`, `2 issues`.
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Feedback for a pivot table that differs from the solution.
pub fn render_pivot_issue(issue: &PivotIssue, range_label: &str) -> String {
    format!(
        "{} with the pivot table in range `{range_label}`: {}",
        pluralize(1, "issue"),
        describe_pivot_issue(issue)
    )
}

/// Feedback when the student has no pivot table where one is expected.
pub fn render_missing_pivot(range_label: &str) -> String {
    format!("Please fill in a pivot table in range `{range_label}`.")
}

/// Feedback for cells that differ from the solution; `first` is quoted, the rest counted.
pub fn render_cell_issues(
    kind: GridKind,
    mismatches: usize,
    first: &CellMismatch,
    range_label: &str,
) -> String {
    let expected = describe_cell(kind, &first.expected);
    let actual = describe_cell(kind, &first.actual);
    format!(
        "{} with the {} in range `{range_label}`: In cell `{}`, expected {expected}, but got {actual}.",
        pluralize(mismatches, "issue"),
        kind.noun(),
        first.cell
    )
}

fn describe_cell(kind: GridKind, value: &CellValue) -> String {
    if value.is_empty() {
        return "an empty cell".to_string();
    }
    match (kind, value.as_formula()) {
        (GridKind::Formulas, Some(formula)) => format!("the formula `{formula}`"),
        _ => format!("`{value}`"),
    }
}

fn position(axis: PivotAxis, position: usize) -> String {
    format!("{} {}", ordinal(position + 1), axis.singular())
}

fn describe_pivot_issue(issue: &PivotIssue) -> String {
    match issue {
        PivotIssue::SourceData => {
            "The pivot table is not reading from the correct source data.".to_string()
        }
        PivotIssue::MissingGroupings { axis } => format!("There are no {}.", axis.plural()),
        PivotIssue::UnexpectedGroupings { axis } => {
            format!("There are {} but there shouldn't be.", axis.plural())
        }
        PivotIssue::GroupingCount {
            axis,
            expected,
            actual,
        } => describe_grouping_count(*axis, *expected, *actual),
        PivotIssue::Grouping {
            axis,
            position: at,
            mismatch,
        } => describe_grouping(&position(*axis, *at), mismatch),
        PivotIssue::MissingValues => "There are no values.".to_string(),
        PivotIssue::ValueCount { expected, actual } => format!(
            "The number of values is incorrect, expected {expected} but got {actual}."
        ),
        PivotIssue::Value {
            position: at,
            mismatch,
        } => describe_value(&format!("{} value", ordinal(at + 1)), mismatch),
        PivotIssue::MissingFilters => "There are no filters.".to_string(),
        PivotIssue::UnexpectedFilters => "There are filters but there shouldn't be.".to_string(),
        PivotIssue::GroupingsUsed => "The rows or columns used are incorrect.".to_string(),
        PivotIssue::FilteredColumns => "The filters are set on the wrong columns.".to_string(),
        PivotIssue::FilteredValues { target } => {
            let filter = match target {
                FilterTarget::Grouping { axis, position: at } => {
                    format!("the {}", position(*axis, *at))
                }
                FilterTarget::SourceColumn { column } => {
                    format!("column `{}`", col_to_name(*column))
                }
                FilterTarget::Key { key } => format!("the filter `{key}`"),
            };
            format!("The filtered out values for {filter} are incorrect.")
        }
    }
}

fn describe_grouping_count(axis: PivotAxis, expected: usize, actual: usize) -> String {
    let (singular, plural) = (axis.singular(), axis.plural());
    let fix = if actual > expected {
        let extra = actual - expected;
        if extra == 1 {
            format!(
                "there are too many {plural}, remove the {} {singular}",
                ordinal(actual)
            )
        } else {
            format!("there are too many {plural}, remove the last {extra} {plural}")
        }
    } else {
        let missing = expected - actual;
        if missing == 1 {
            format!(
                "there are too few {plural}, add a {} {singular}",
                ordinal(expected)
            )
        } else {
            format!("there are too few {plural}, add {missing} more {plural}")
        }
    };
    format!("The number of {plural} is incorrect, {fix}.")
}

fn describe_grouping(field: &str, mismatch: &GroupingMismatch) -> String {
    match mismatch {
        GroupingMismatch::SourceColumn => {
            format!("In the {field}, the grouping variable is incorrect, use the correct field.")
        }
        GroupingMismatch::SortOrder { expected, actual } => format!(
            "In the {field}, the sort order is incorrect. Expected `{expected}`, but got `{actual}`."
        ),
        GroupingMismatch::ValueBucket => format!("In the {field}, the sort group is incorrect."),
        GroupingMismatch::Named => format!("Don't give the {field} a name."),
        GroupingMismatch::ShowTotals { expected: true } => format!(
            "In the {field}, the totals are not showing, make sure to show the totals."
        ),
        GroupingMismatch::ShowTotals { expected: false } => {
            format!("In the {field}, the totals are showing but they shouldn't be.")
        }
    }
}

fn describe_value(field: &str, mismatch: &ValueMismatch) -> String {
    match mismatch {
        ValueMismatch::CalculatedField => {
            format!("In the {field}, the calculated field is incorrect.")
        }
        ValueMismatch::SummarizeFunction { expected, actual } => format!(
            "In the {field}, the summarize function is incorrect. Expected `{expected}`, but got `{actual}`."
        ),
        ValueMismatch::SourceColumn => {
            format!("In the {field}, the summarized field is incorrect, use the correct field.")
        }
        ValueMismatch::DisplayType { expected, actual } => format!(
            "In the {field}, show the values as {} instead of {}.",
            expected.label(),
            actual.label()
        ),
    }
}
