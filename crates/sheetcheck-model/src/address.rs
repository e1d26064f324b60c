use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A reference to a single cell within a sheet.
///
/// Rows and columns are **0-indexed**:
/// - `row = 0` is spreadsheet row `1`
/// - `col = 0` is spreadsheet column `A`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// 0-indexed row.
    pub row: u32,
    /// 0-indexed column.
    pub col: u32,
}

impl CellRef {
    /// Construct a new [`CellRef`].
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Convert to A1 notation (e.g. `A1`, `BC32`).
    pub fn to_a1(self) -> String {
        format!("{}{}", col_to_name(self.col), u64::from(self.row) + 1)
    }

    /// Parse an A1-style reference (e.g. `A1`, `$B$2`, `aa10`).
    pub fn from_a1(a1: &str) -> Result<Self, RangeParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }

        let (letters, rest) = split_prefix(strip_absolute(s), |c| c.is_ascii_alphabetic());
        if letters.is_empty() {
            return Err(RangeParseError::MissingColumn);
        }
        let (digits, rest) = split_prefix(strip_absolute(rest), |c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(RangeParseError::MissingRow);
        }
        if !rest.is_empty() {
            return Err(RangeParseError::TrailingCharacters);
        }

        let col = name_to_col(letters)?;
        match digits.parse::<u32>() {
            Ok(row) if row > 0 => Ok(Self::new(row - 1, col)),
            _ => Err(RangeParseError::InvalidRow),
        }
    }
}

/// Drop one `$` absolute marker, if present.
fn strip_absolute(s: &str) -> &str {
    s.strip_prefix('$').unwrap_or(s)
}

/// Split `s` after its longest prefix of characters matching `pred`.
fn split_prefix(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// A rectangular block of cells addressed by half-open index spans.
///
/// Always normalized so that `start_row <= end_row` and `start_col <= end_col`;
/// the `end_*` bounds are exclusive. A single cell `B3` is
/// `{start_row: 2, end_row: 3, start_col: 1, end_col: 2}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl GridRange {
    /// Build the span covering both corners (inclusive), normalizing reversed corners.
    pub fn from_corners(a: CellRef, b: CellRef) -> Self {
        Self {
            start_row: a.row.min(b.row),
            end_row: a.row.max(b.row).saturating_add(1),
            start_col: a.col.min(b.col),
            end_col: a.col.max(b.col).saturating_add(1),
        }
    }

    /// Parse a single cell (`C3`) or two-corner range (`B2:C10`) in A1 notation.
    pub fn from_a1(a1: &str) -> Result<Self, RangeParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }

        match s.split_once(':') {
            None => {
                let cell = CellRef::from_a1(s)?;
                Ok(Self::from_corners(cell, cell))
            }
            Some((a, b)) => {
                let start = CellRef::from_a1(a)?;
                let end = CellRef::from_a1(b)?;
                Ok(Self::from_corners(start, end))
            }
        }
    }

    /// Top-left cell of the range.
    #[inline]
    pub const fn start(&self) -> CellRef {
        CellRef::new(self.start_row, self.start_col)
    }

    /// Number of rows covered.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.end_row - self.start_row
    }

    /// Number of columns covered.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.end_col - self.start_col
    }

    /// Returns true if the range is exactly one cell.
    #[inline]
    pub const fn is_single_cell(&self) -> bool {
        self.height() == 1 && self.width() == 1
    }
}

impl fmt::Display for GridRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start();
        if self.is_single_cell() {
            write!(f, "{start}")
        } else {
            let end = CellRef::new(
                self.end_row.saturating_sub(1),
                self.end_col.saturating_sub(1),
            );
            write!(f, "{start}:{end}")
        }
    }
}

/// Resolve an A1 range string into zero-based, end-exclusive row/column spans.
pub fn resolve_range(range_spec: &str) -> Result<GridRange, RangeParseError> {
    GridRange::from_a1(range_spec)
}

/// Errors that can occur when parsing an A1 cell or range reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("empty A1 reference")]
    Empty,
    #[error("missing column in A1 reference")]
    MissingColumn,
    #[error("missing row in A1 reference")]
    MissingRow,
    #[error("invalid column in A1 reference")]
    InvalidColumn,
    #[error("invalid row in A1 reference")]
    InvalidRow,
    #[error("trailing characters in A1 reference")]
    TrailingCharacters,
}

/// Column letters for a 0-based column index (`0 => A`, `26 => AA`).
pub fn col_to_name(col: u32) -> String {
    // Columns are 1-based in A1 notation. We store 0-based internally.
    let mut n = u64::from(col) + 1;
    let mut out = Vec::<char>::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        out.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    out.iter().rev().collect()
}

fn name_to_col(s: &str) -> Result<u32, RangeParseError> {
    let mut col: u32 = 0;
    for b in s.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(RangeParseError::InvalidColumn);
        }
        let v = u32::from(b.to_ascii_uppercase() - b'A') + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(v))
            .ok_or(RangeParseError::InvalidColumn)?;
    }
    if col == 0 {
        return Err(RangeParseError::InvalidColumn);
    }
    Ok(col - 1)
}
