use sheetcheck_model::pivots::{CalculatedDisplayType, PivotAxis, SortOrder, SummarizeFunction};

/// The first difference found between a solution pivot table and a student pivot table.
///
/// Positions are 0-based indexes into the relevant list; feedback renders them as ordinals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PivotIssue {
    /// Any of the four source bounds differs.
    SourceData,
    /// The solution groups along `axis`, the student does not.
    MissingGroupings { axis: PivotAxis },
    /// The student groups along `axis`, the solution does not.
    UnexpectedGroupings { axis: PivotAxis },
    GroupingCount {
        axis: PivotAxis,
        expected: usize,
        actual: usize,
    },
    Grouping {
        axis: PivotAxis,
        position: usize,
        mismatch: GroupingMismatch,
    },
    MissingValues,
    ValueCount { expected: usize, actual: usize },
    Value {
        position: usize,
        mismatch: ValueMismatch,
    },
    MissingFilters,
    UnexpectedFilters,
    /// A filtered column set mismatch involving a column that is also grouped on.
    GroupingsUsed,
    /// The filtered column sets differ, none of the differing columns is grouped on.
    FilteredColumns,
    FilteredValues { target: FilterTarget },
}

/// What differs within one row or column grouping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupingMismatch {
    SourceColumn,
    SortOrder { expected: SortOrder, actual: SortOrder },
    ValueBucket,
    /// The student labelled a grouping that should keep its default name.
    Named,
    ShowTotals { expected: bool },
}

/// What differs within one value field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueMismatch {
    CalculatedField,
    SummarizeFunction {
        expected: SummarizeFunction,
        actual: SummarizeFunction,
    },
    SourceColumn,
    DisplayType {
        expected: CalculatedDisplayType,
        actual: CalculatedDisplayType,
    },
}

/// The logical filter a `visibleValues` mismatch belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterTarget {
    /// The filtered column is also a grouping field of the solution.
    Grouping { axis: PivotAxis, position: usize },
    /// Absolute 0-based sheet column of the filtered source column.
    SourceColumn { column: u32 },
    /// A criteria key that is not a column offset.
    Key { key: String },
}
