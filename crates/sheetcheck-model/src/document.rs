use serde::{Deserialize, Deserializer, Serialize};

use crate::grid::crop_range;
use crate::pivots::PivotTable;
use crate::{CellRef, CellValue, GridRange};

/// One parsed spreadsheet (student submission or reference solution).
///
/// `values` and `formulas` are row-major grids of equal shape. `pivot_tables[r][c]` lists
/// the pivot tables anchored at cell `(r, c)`; most cells have none.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetDocument {
    #[serde(default)]
    pub values: Vec<Vec<CellValue>>,
    #[serde(default)]
    pub formulas: Vec<Vec<CellValue>>,
    #[serde(default, deserialize_with = "deserialize_pivot_grid")]
    pub pivot_tables: Vec<Vec<Vec<PivotTable>>>,
}

impl SpreadsheetDocument {
    /// All pivot tables anchored at `cell` (empty when the cell is outside the grid).
    pub fn pivot_tables_at(&self, cell: CellRef) -> &[PivotTable] {
        let row = usize::try_from(cell.row).ok();
        let col = usize::try_from(cell.col).ok();
        row.zip(col)
            .and_then(|(r, c)| self.pivot_tables.get(r)?.get(c))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The pivot table anchored at `cell`; checks always use the first one.
    pub fn pivot_table_at(&self, cell: CellRef) -> Option<&PivotTable> {
        self.pivot_tables_at(cell).first()
    }

    /// Independent copy of the `values` cells covered by `range`.
    pub fn values_in(&self, range: &GridRange) -> Vec<Vec<CellValue>> {
        crop_range(&self.values, range)
    }

    /// Independent copy of the `formulas` cells covered by `range`.
    pub fn formulas_in(&self, range: &GridRange) -> Vec<Vec<CellValue>> {
        crop_range(&self.formulas, range)
    }
}

/// A pivot cell may be `null`, a single pivot table, or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum PivotSlot {
    Empty,
    Many(Vec<PivotTable>),
    One(Box<PivotTable>),
}

impl PivotSlot {
    fn into_tables(self) -> Vec<PivotTable> {
        match self {
            PivotSlot::Empty => Vec::new(),
            PivotSlot::Many(tables) => tables,
            PivotSlot::One(table) => vec![*table],
        }
    }
}

fn deserialize_pivot_grid<'de, D>(deserializer: D) -> Result<Vec<Vec<Vec<PivotTable>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let grid = Option::<Vec<Vec<PivotSlot>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(grid
        .into_iter()
        .map(|row| row.into_iter().map(PivotSlot::into_tables).collect())
        .collect())
}
