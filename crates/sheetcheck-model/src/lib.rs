//! `sheetcheck-model` defines the spreadsheet data a submission check works on.
//!
//! The crate is intentionally small and pure (no I/O, no logging) so it can be reused by:
//! - the checks in `sheetcheck` (pivot comparison, value and formula checks)
//! - fuzzing harnesses and tooling that decode spreadsheet API payloads via `serde`

mod address;
mod document;
mod formula_text;
mod grid;
pub mod pivots;
mod value;

pub use address::{col_to_name, resolve_range, CellRef, GridRange, RangeParseError};
pub use document::SpreadsheetDocument;
pub use formula_text::{
    formula_tokens, formulas_equivalent, is_formula_text, normalize_formula_text,
};
pub use grid::{crop, crop_range};
pub use value::CellValue;
