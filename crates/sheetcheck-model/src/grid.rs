//! Cropping row-major 2-D grids to an A1 range.
//!
//! Bounds policy: cropping never fails for ranges that lie partly or wholly outside the grid.
//! Rows past the end of the grid are dropped, and each kept row is cut to the columns it
//! actually has, so a row that is too short yields an empty row rather than an error.
//!
//! Ranges written with reversed corners (`C10:B2`) are normalized by the resolver and crop
//! the same cells as `B2:C10`; they never produce an empty span.

use crate::address::{resolve_range, GridRange, RangeParseError};

/// Copy the cells covered by `range_spec` out of `grid`.
///
/// The result is independently owned: mutating it never affects `grid`.
pub fn crop<T: Clone>(grid: &[Vec<T>], range_spec: &str) -> Result<Vec<Vec<T>>, RangeParseError> {
    let range = resolve_range(range_spec)?;
    Ok(crop_range(grid, &range))
}

/// Like [`crop`], for an already-resolved range.
pub fn crop_range<T: Clone>(grid: &[Vec<T>], range: &GridRange) -> Vec<Vec<T>> {
    let rows = clamp_span(grid.len(), range.start_row, range.end_row);
    grid[rows.0..rows.1]
        .iter()
        .map(|row| {
            let (start, end) = clamp_span(row.len(), range.start_col, range.end_col);
            row[start..end].to_vec()
        })
        .collect()
}

fn clamp_span(len: usize, start: u32, end: u32) -> (usize, usize) {
    let start = usize::try_from(start).unwrap_or(usize::MAX).min(len);
    let end = usize::try_from(end).unwrap_or(usize::MAX).min(len);
    (start, end.max(start))
}
