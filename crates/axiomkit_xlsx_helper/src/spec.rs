//! Shared XLSX helper models, policies and error types.

use std::fmt;

use thiserror::Error;

use crate::conf::{
    N_FONT_SIZE_AUTOFIT_DEFAULT, N_PIXELS_PER_EXCEL_WIDTH_UNIT, N_WIDTH_AUTOFIT_PADDING,
};

////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Result alias using [`XlsxHelperError`].
pub type Result<T> = std::result::Result<T, XlsxHelperError>;

/// Errors raised by the helper layer.
#[derive(Debug, Error)]
pub enum XlsxHelperError {
    /// Address text does not decompose into `<letters><digits>`.
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Range text is not `<start>:<end>`.
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Column identifier is neither letters nor a valid index.
    #[error("Invalid column identifier: {0}")]
    InvalidColumn(String),

    /// Row number out of Excel bounds (1-based).
    #[error("Row number {0} out of bounds (1..={1})")]
    RowOutOfBounds(u64, u32),

    /// Column number out of Excel bounds (1-based).
    #[error("Column number {0} out of bounds (1..={1})")]
    ColumnOutOfBounds(u64, u16),

    /// Row height or column width is negative or not finite.
    #[error("Invalid {0}: {1} (expected a finite value >= 0)")]
    InvalidDimension(&'static str, f64),

    /// Sheet name already used in workbook (case-insensitive).
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Sheet lookup failed.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Color text is not `RRGGBB` / `AARRGGBB` hex.
    #[error("Invalid color: {0:?} (expected RRGGBB or AARRGGBB hex)")]
    InvalidColor(String),

    /// Merge overlaps an existing merged region.
    #[error("Range {0} overlaps merged region {1}")]
    MergeConflict(String, String),

    /// Autofit policy values are unusable.
    #[error("Invalid autofit policy: {0}")]
    InvalidPolicy(String),

    /// Failure from the underlying workbook writer.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AddressSpecification

/// One cell position; both indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpecCellAddress {
    /// Row index (`0` is Excel row `1`).
    pub row_idx: u32,
    /// Column index (`0` is column `A`).
    pub col_idx: u16,
}

impl SpecCellAddress {
    pub fn new(row_idx: u32, col_idx: u16) -> Self {
        Self { row_idx, col_idx }
    }

    /// Excel row number as displayed (1-based).
    pub fn row_number(&self) -> u32 {
        self.row_idx + 1
    }

    /// Column letters (`A`, `Z`, `AA`, ...).
    pub fn col_letters(&self) -> String {
        crate::range::column_index_to_letters(self.col_idx)
    }
}

impl fmt::Display for SpecCellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col_letters(), self.row_number())
    }
}

/// Inclusive rectangle with `start` top-left and `end` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecCellRange {
    pub start: SpecCellAddress,
    pub end: SpecCellAddress,
}

impl SpecCellRange {
    /// Build a range from any two corners.
    pub fn from_corners(a: SpecCellAddress, b: SpecCellAddress) -> Self {
        Self {
            start: SpecCellAddress::new(a.row_idx.min(b.row_idx), a.col_idx.min(b.col_idx)),
            end: SpecCellAddress::new(a.row_idx.max(b.row_idx), a.col_idx.max(b.col_idx)),
        }
    }

    pub fn contains(&self, address: &SpecCellAddress) -> bool {
        (self.start.row_idx..=self.end.row_idx).contains(&address.row_idx)
            && (self.start.col_idx..=self.end.col_idx).contains(&address.col_idx)
    }

    pub fn intersects(&self, other: &SpecCellRange) -> bool {
        self.start.row_idx <= other.end.row_idx
            && other.start.row_idx <= self.end.row_idx
            && self.start.col_idx <= other.end.col_idx
            && other.start.col_idx <= self.end.col_idx
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for SpecCellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Column selector reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumColumnIdentifier {
    /// Select by column letters (`"B"`, `"aa"`).
    Letters(String),
    /// Select by zero-based column index.
    Index(u16),
}

impl From<&str> for EnumColumnIdentifier {
    fn from(value: &str) -> Self {
        Self::Letters(value.to_string())
    }
}

impl From<u16> for EnumColumnIdentifier {
    fn from(value: u16) -> Self {
        Self::Index(value)
    }
}

impl fmt::Display for EnumColumnIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letters(val) => write!(f, "{val}"),
            Self::Index(val) => write!(f, "#{val}"),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellSpecification

/// Stored cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Blank cell.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// Formula text, with or without leading `=`.
    Formula(String),
}

impl EnumCellValue {
    /// Borrow text when the value is a plain string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(val) => Some(val),
            _ => None,
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for EnumCellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Font attributes; `None` fields fall back to the writer default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCellFont {
    /// Font family name.
    pub name: Option<String>,
    /// Font size in points.
    pub size: Option<f64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,
    /// Font color as `AARRGGBB` / `RRGGBB` hex.
    pub color: Option<String>,
}

impl SpecCellFont {
    /// Merge two fonts with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFont) -> SpecCellFont {
        SpecCellFont {
            name: other.name.clone().or_else(|| self.name.clone()),
            size: other.size.or(self.size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            color: other.color.clone().or_else(|| self.color.clone()),
        }
    }
}

/// Horizontal alignment choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumHorizontalAlign {
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterAcross,
    Distributed,
}

/// Vertical alignment choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumVerticalAlign {
    Top,
    /// Excel "middle".
    Middle,
    Bottom,
    Justify,
    Distributed,
}

/// Cell alignment; an absent cell alignment behaves like `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecCellAlignment {
    pub horizontal: Option<EnumHorizontalAlign>,
    pub vertical: Option<EnumVerticalAlign>,
    /// Wrap text, letting row height follow content.
    pub wrap_text: bool,
}

/// Solid background fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCellFill {
    /// Fill color as `AARRGGBB` / `RRGGBB` hex.
    pub color: String,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AutofitSpecification

/// Column autofit policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecAutofitPolicy {
    /// Rendered pixels per Excel width unit.
    pub pixels_per_width_unit: f64,
    /// Width units added after conversion.
    pub width_padding: f64,
    /// Font size used for cells without an explicit size.
    pub font_size_default: f64,
}

impl Default for SpecAutofitPolicy {
    fn default() -> Self {
        Self {
            pixels_per_width_unit: N_PIXELS_PER_EXCEL_WIDTH_UNIT,
            width_padding: N_WIDTH_AUTOFIT_PADDING,
            font_size_default: N_FONT_SIZE_AUTOFIT_DEFAULT,
        }
    }
}

/// Width assigned to one column by autofit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecColumnWidth {
    /// Zero-based column index.
    pub col_idx: u16,
    /// Width in Excel width units.
    pub width: f64,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
