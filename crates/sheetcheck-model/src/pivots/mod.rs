//! Pivot table definitions as delivered by the spreadsheet API.
//!
//! These types describe *what* a pivot table is configured to do (source data, grouping
//! fields, aggregated values, filters); they never hold the pivot's computed output.
//! Keys use the API's camelCase spelling and every optional collection defaults to empty,
//! so a definition missing `columns` or `criteria` decodes the same as one with empty values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A complete pivot table definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotTable {
    #[serde(default)]
    pub source: PivotSource,
    #[serde(default)]
    pub rows: Vec<GroupingField>,
    #[serde(default)]
    pub columns: Vec<GroupingField>,
    #[serde(default)]
    pub values: Vec<ValueField>,
    /// Filters keyed by source column offset (as a decimal string).
    #[serde(default)]
    pub criteria: BTreeMap<String, FilterCriteria>,
}

impl PivotTable {
    /// Grouping fields for one axis.
    pub fn groupings(&self, axis: PivotAxis) -> &[GroupingField] {
        match axis {
            PivotAxis::Rows => &self.rows,
            PivotAxis::Columns => &self.columns,
        }
    }

    /// The first grouping field (rows before columns) that groups by `offset`.
    ///
    /// Returns the axis and the 0-based position of that field on its axis.
    pub fn grouping_for_offset(&self, offset: u32) -> Option<(PivotAxis, usize)> {
        PivotAxis::ALL.into_iter().find_map(|axis| {
            self.groupings(axis)
                .iter()
                .position(|field| field.source_column_offset == offset)
                .map(|position| (axis, position))
        })
    }
}

/// The two grouping axes of a pivot table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PivotAxis {
    Rows,
    Columns,
}

impl PivotAxis {
    pub const ALL: [PivotAxis; 2] = [PivotAxis::Rows, PivotAxis::Columns];

    /// Singular noun used in feedback (`row`, `column`).
    pub fn singular(self) -> &'static str {
        match self {
            PivotAxis::Rows => "row",
            PivotAxis::Columns => "column",
        }
    }

    /// Plural noun used in feedback (`rows`, `columns`).
    pub fn plural(self) -> &'static str {
        match self {
            PivotAxis::Rows => "rows",
            PivotAxis::Columns => "columns",
        }
    }
}

/// Half-open index spans of the data range a pivot table reads from.
///
/// The API omits zero-valued bounds, so every bound defaults to `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,
    #[serde(default)]
    pub start_row_index: u32,
    #[serde(default)]
    pub end_row_index: u32,
    #[serde(default)]
    pub start_column_index: u32,
    #[serde(default)]
    pub end_column_index: u32,
}

impl PivotSource {
    /// Returns true when both sources cover exactly the same cells (the sheet id is ignored).
    pub fn same_bounds(&self, other: &PivotSource) -> bool {
        self.start_row_index == other.start_row_index
            && self.end_row_index == other.end_row_index
            && self.start_column_index == other.start_column_index
            && self.end_column_index == other.end_column_index
    }
}

/// Sort order applied to a grouping field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "SORT_ORDER_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "ASCENDING")]
    Ascending,
    #[serde(rename = "DESCENDING")]
    Descending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Unspecified => "SORT_ORDER_UNSPECIFIED",
            SortOrder::Ascending => "ASCENDING",
            SortOrder::Descending => "DESCENDING",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row or column grouping of a pivot table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingField {
    /// Offset of the grouped column within the source; the API omits it when it is `0`.
    #[serde(default)]
    pub source_column_offset: u32,
    #[serde(default)]
    pub show_totals: bool,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// Custom bucket used for sorting/grouping; compared structurally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_bucket: Option<serde_json::Value>,
    /// User supplied label for the grouping.
    #[serde(default, alias = "label", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl GroupingField {
    pub fn new(source_column_offset: u32) -> Self {
        Self {
            source_column_offset,
            show_totals: true,
            sort_order: SortOrder::Ascending,
            value_bucket: None,
            name: None,
        }
    }
}

/// Aggregation applied by a value field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummarizeFunction {
    #[default]
    #[serde(rename = "SUMMARIZE_FUNCTION_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "SUM")]
    Sum,
    #[serde(rename = "COUNTA")]
    CountA,
    #[serde(rename = "COUNT")]
    Count,
    #[serde(rename = "COUNTUNIQUE")]
    CountUnique,
    #[serde(rename = "AVERAGE")]
    Average,
    #[serde(rename = "MAX")]
    Max,
    #[serde(rename = "MIN")]
    Min,
    #[serde(rename = "MEDIAN")]
    Median,
    #[serde(rename = "PRODUCT")]
    Product,
    #[serde(rename = "STDEV")]
    StdDev,
    #[serde(rename = "STDEVP")]
    StdDevP,
    #[serde(rename = "VAR")]
    Var,
    #[serde(rename = "VARP")]
    VarP,
    /// Calculated field driven by a formula.
    #[serde(rename = "CUSTOM")]
    Custom,
    #[serde(rename = "NONE")]
    None,
}

impl SummarizeFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            SummarizeFunction::Unspecified => "SUMMARIZE_FUNCTION_UNSPECIFIED",
            SummarizeFunction::Sum => "SUM",
            SummarizeFunction::CountA => "COUNTA",
            SummarizeFunction::Count => "COUNT",
            SummarizeFunction::CountUnique => "COUNTUNIQUE",
            SummarizeFunction::Average => "AVERAGE",
            SummarizeFunction::Max => "MAX",
            SummarizeFunction::Min => "MIN",
            SummarizeFunction::Median => "MEDIAN",
            SummarizeFunction::Product => "PRODUCT",
            SummarizeFunction::StdDev => "STDEV",
            SummarizeFunction::StdDevP => "STDEVP",
            SummarizeFunction::Var => "VAR",
            SummarizeFunction::VarP => "VARP",
            SummarizeFunction::Custom => "CUSTOM",
            SummarizeFunction::None => "NONE",
        }
    }
}

impl fmt::Display for SummarizeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "Show values as" transform of a value field.
///
/// A missing key decodes as [`CalculatedDisplayType::Unspecified`], which is the plain
/// (untransformed) display, so an absent key and an explicit default compare equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculatedDisplayType {
    #[default]
    #[serde(rename = "PIVOT_VALUE_CALCULATED_DISPLAY_TYPE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "PERCENT_OF_ROW_TOTAL")]
    PercentOfRowTotal,
    #[serde(rename = "PERCENT_OF_COLUMN_TOTAL")]
    PercentOfColumnTotal,
    #[serde(rename = "PERCENT_OF_GRAND_TOTAL")]
    PercentOfGrandTotal,
}

impl CalculatedDisplayType {
    pub fn is_default(&self) -> bool {
        matches!(self, CalculatedDisplayType::Unspecified)
    }

    /// Human-facing name, as the spreadsheet UI words it.
    pub fn label(self) -> &'static str {
        match self {
            CalculatedDisplayType::Unspecified => "the default",
            CalculatedDisplayType::PercentOfRowTotal => "% of row total",
            CalculatedDisplayType::PercentOfColumnTotal => "% of column total",
            CalculatedDisplayType::PercentOfGrandTotal => "% of grand total",
        }
    }
}

/// An aggregated measure: either a summarized source column or a calculated field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueField {
    #[serde(default)]
    pub source_column_offset: u32,
    #[serde(default)]
    pub summarize_function: SummarizeFunction,
    #[serde(default, skip_serializing_if = "CalculatedDisplayType::is_default")]
    pub calculated_display_type: CalculatedDisplayType,
    /// Formula of a calculated field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ValueField {
    pub fn summarize(source_column_offset: u32, summarize_function: SummarizeFunction) -> Self {
        Self {
            source_column_offset,
            summarize_function,
            ..Self::default()
        }
    }

    pub fn calculated(name: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            summarize_function: SummarizeFunction::Custom,
            formula: Some(formula.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns true for calculated (formula-driven) fields.
    pub fn is_calculated(&self) -> bool {
        self.summarize_function == SummarizeFunction::Custom
    }
}

/// Allow-list filter on one source column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub visible_values: Vec<String>,
}

impl FilterCriteria {
    /// Returns true when both filters let through the same values, ignoring order and duplicates.
    pub fn same_visible_values(&self, other: &FilterCriteria) -> bool {
        use std::collections::BTreeSet;

        let a: BTreeSet<&str> = self.visible_values.iter().map(String::as_str).collect();
        let b: BTreeSet<&str> = other.visible_values.iter().map(String::as_str).collect();
        a == b
    }
}

/// Parse a `criteria` key into a source column offset.
pub fn criteria_offset(key: &str) -> Option<u32> {
    key.trim().parse().ok()
}

#[cfg(test)]
mod tests;
