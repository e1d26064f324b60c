//! Structural comparison of pivot table definitions.
//!
//! The comparison walks an ordered list of rules and stops at the first one that reports an
//! issue. Rule order is the reporting precedence: a wrong source range is reported before
//! anything about rows, a wrong row count before any individual row, and so on. Grouping
//! totals are only checked once every value field matches.
//!
//! Collections are compared with the semantics each field has in the spreadsheet:
//! `rows`, `columns` and `values` positionally, `criteria` keys and `visibleValues` as sets.

mod issue;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sheetcheck_model::formulas_equivalent;
use sheetcheck_model::pivots::{
    criteria_offset, FilterCriteria, GroupingField, PivotAxis, PivotTable, ValueField,
};

pub use issue::{FilterTarget, GroupingMismatch, PivotIssue, ValueMismatch};

/// How an axis without grouping fields is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueCountMode {
    /// An empty solution axis requires an empty student axis, and the other way around.
    #[default]
    Exact,
    /// A pivot may summarize instead of grouping: an axis is only compared when both pivots
    /// group along it, so an empty axis on either side is accepted.
    Summary,
}

/// Knobs for [`compare_pivots`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompareOptions {
    pub value_count_mode: ValueCountMode,
}

type Rule = fn(&PivotTable, &PivotTable, &CompareOptions) -> Option<PivotIssue>;

/// Rules in reporting precedence order.
const RULES: [(&str, Rule); 6] = [
    ("source", compare_source as Rule),
    ("rows", compare_rows as Rule),
    ("columns", compare_columns as Rule),
    ("values", compare_values as Rule),
    ("totals", compare_totals as Rule),
    ("criteria", compare_criteria as Rule),
];

/// Compare a student's pivot table against the solution's.
///
/// Returns `None` when the definitions are equivalent, otherwise the highest-precedence issue.
pub fn compare_pivots(
    solution: &PivotTable,
    student: &PivotTable,
    options: &CompareOptions,
) -> Option<PivotIssue> {
    RULES.iter().find_map(|(name, rule)| {
        let issue = rule(solution, student, options)?;
        log::debug!("pivot rule `{name}` failed: {issue:?}");
        Some(issue)
    })
}

fn compare_source(
    solution: &PivotTable,
    student: &PivotTable,
    _options: &CompareOptions,
) -> Option<PivotIssue> {
    (!solution.source.same_bounds(&student.source)).then_some(PivotIssue::SourceData)
}

fn compare_rows(
    solution: &PivotTable,
    student: &PivotTable,
    options: &CompareOptions,
) -> Option<PivotIssue> {
    compare_axis(PivotAxis::Rows, solution, student, options)
}

fn compare_columns(
    solution: &PivotTable,
    student: &PivotTable,
    options: &CompareOptions,
) -> Option<PivotIssue> {
    compare_axis(PivotAxis::Columns, solution, student, options)
}

fn compare_axis(
    axis: PivotAxis,
    solution: &PivotTable,
    student: &PivotTable,
    options: &CompareOptions,
) -> Option<PivotIssue> {
    let expected = solution.groupings(axis);
    let actual = student.groupings(axis);

    if options.value_count_mode == ValueCountMode::Summary
        && (expected.is_empty() || actual.is_empty())
    {
        return None;
    }

    match (expected.is_empty(), actual.is_empty()) {
        (false, true) => return Some(PivotIssue::MissingGroupings { axis }),
        (true, false) => return Some(PivotIssue::UnexpectedGroupings { axis }),
        _ => {}
    }

    if expected.len() != actual.len() {
        return Some(PivotIssue::GroupingCount {
            axis,
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    expected
        .iter()
        .zip(actual)
        .enumerate()
        .find_map(|(position, (expected, actual))| {
            compare_grouping(expected, actual).map(|mismatch| PivotIssue::Grouping {
                axis,
                position,
                mismatch,
            })
        })
}

fn compare_grouping(expected: &GroupingField, actual: &GroupingField) -> Option<GroupingMismatch> {
    if expected.source_column_offset != actual.source_column_offset {
        return Some(GroupingMismatch::SourceColumn);
    }
    if expected.sort_order != actual.sort_order {
        return Some(GroupingMismatch::SortOrder {
            expected: expected.sort_order,
            actual: actual.sort_order,
        });
    }
    if expected.value_bucket != actual.value_bucket {
        return Some(GroupingMismatch::ValueBucket);
    }
    if expected.name.is_none() && actual.name.is_some() {
        return Some(GroupingMismatch::Named);
    }
    None
}

fn compare_values(
    solution: &PivotTable,
    student: &PivotTable,
    _options: &CompareOptions,
) -> Option<PivotIssue> {
    let expected = &solution.values;
    let actual = &student.values;

    if !expected.is_empty() && actual.is_empty() {
        return Some(PivotIssue::MissingValues);
    }
    if expected.len() != actual.len() {
        return Some(PivotIssue::ValueCount {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    expected
        .iter()
        .zip(actual)
        .enumerate()
        .find_map(|(position, (expected, actual))| {
            compare_value(expected, actual)
                .map(|mismatch| PivotIssue::Value { position, mismatch })
        })
}

fn compare_value(expected: &ValueField, actual: &ValueField) -> Option<ValueMismatch> {
    if expected.is_calculated() {
        let same_formula = match (expected.formula.as_deref(), actual.formula.as_deref()) {
            (Some(expected), Some(actual)) => formulas_equivalent(expected, actual),
            (None, None) => true,
            _ => false,
        };
        return (!same_formula).then_some(ValueMismatch::CalculatedField);
    }

    if expected.summarize_function != actual.summarize_function {
        return Some(ValueMismatch::SummarizeFunction {
            expected: expected.summarize_function,
            actual: actual.summarize_function,
        });
    }
    if expected.source_column_offset != actual.source_column_offset {
        return Some(ValueMismatch::SourceColumn);
    }
    if expected.calculated_display_type != actual.calculated_display_type {
        return Some(ValueMismatch::DisplayType {
            expected: expected.calculated_display_type,
            actual: actual.calculated_display_type,
        });
    }
    None
}

/// Totals of each grouping field, rows before columns.
///
/// In summary mode the axes may differ in length; only their common prefix is compared.
fn compare_totals(
    solution: &PivotTable,
    student: &PivotTable,
    _options: &CompareOptions,
) -> Option<PivotIssue> {
    PivotAxis::ALL.into_iter().find_map(|axis| {
        solution
            .groupings(axis)
            .iter()
            .zip(student.groupings(axis))
            .enumerate()
            .find_map(|(position, (expected, actual))| {
                (expected.show_totals != actual.show_totals).then_some(PivotIssue::Grouping {
                    axis,
                    position,
                    mismatch: GroupingMismatch::ShowTotals {
                        expected: expected.show_totals,
                    },
                })
            })
    })
}

/// A `criteria` key; keys that parse as column offsets compare by offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CriteriaKey<'a> {
    Offset(u32),
    Named(&'a str),
}

impl<'a> CriteriaKey<'a> {
    fn parse(key: &'a str) -> Self {
        criteria_offset(key).map_or(CriteriaKey::Named(key), CriteriaKey::Offset)
    }
}

fn keyed_criteria(pivot: &PivotTable) -> BTreeMap<CriteriaKey<'_>, &FilterCriteria> {
    pivot
        .criteria
        .iter()
        .map(|(key, filter)| (CriteriaKey::parse(key), filter))
        .collect()
}

fn compare_criteria(
    solution: &PivotTable,
    student: &PivotTable,
    _options: &CompareOptions,
) -> Option<PivotIssue> {
    match (solution.criteria.is_empty(), student.criteria.is_empty()) {
        (true, true) => return None,
        (false, true) => return Some(PivotIssue::MissingFilters),
        (true, false) => return Some(PivotIssue::UnexpectedFilters),
        (false, false) => {}
    }

    let expected = keyed_criteria(solution);
    let actual = keyed_criteria(student);
    if !expected.keys().eq(actual.keys()) {
        let touches_grouping = expected
            .keys()
            .filter(|key| !actual.contains_key(*key))
            .chain(actual.keys().filter(|key| !expected.contains_key(*key)))
            .any(|key| match *key {
                CriteriaKey::Offset(offset) => {
                    solution.grouping_for_offset(offset).is_some()
                        || student.grouping_for_offset(offset).is_some()
                }
                CriteriaKey::Named(_) => false,
            });
        return Some(if touches_grouping {
            PivotIssue::GroupingsUsed
        } else {
            PivotIssue::FilteredColumns
        });
    }

    // Same key sets, so both maps iterate in the same (offset-first) order.
    expected
        .iter()
        .zip(actual.values())
        .find_map(|((key, expected), actual)| {
            (!expected.same_visible_values(actual)).then(|| PivotIssue::FilteredValues {
                target: filter_target(solution, *key),
            })
        })
}

fn filter_target(solution: &PivotTable, key: CriteriaKey<'_>) -> FilterTarget {
    match key {
        CriteriaKey::Offset(offset) => match solution.grouping_for_offset(offset) {
            Some((axis, position)) => FilterTarget::Grouping { axis, position },
            None => FilterTarget::SourceColumn {
                column: solution.source.start_column_index.saturating_add(offset),
            },
        },
        CriteriaKey::Named(key) => FilterTarget::Key {
            key: key.to_string(),
        },
    }
}
