//! XLSX helper constants and default preset factories.

use crate::spec::SpecCellFont;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: u32 = 1_048_576;
/// Excel worksheet maximum column count (`XFD`).
pub const N_NCOLS_EXCEL_MAX: u16 = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Excel column width maximum, in width units.
pub const N_WIDTH_EXCEL_COLUMN_MAX: f64 = 255.0;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Rendered pixels per Excel column width unit, determined by experimentation.
pub const N_PIXELS_PER_EXCEL_WIDTH_UNIT: f64 = 6.0;
/// Width units added to every autofit column.
pub const N_WIDTH_AUTOFIT_PADDING: f64 = 1.0;
/// Font size assumed by autofit when a cell has no explicit size.
pub const N_FONT_SIZE_AUTOFIT_DEFAULT: f64 = 11.0;

/// Font family used by value/font setters when none is given.
pub const C_FONT_NAME_DEFAULT: &str = "Arial";
/// Font size used by value/font setters when none is given.
pub const N_FONT_SIZE_DEFAULT: f64 = 12.0;

/// Build the font preset applied by `set_value` and `set_font_in_all_empty_cells`.
pub fn derive_default_font() -> SpecCellFont {
    SpecCellFont {
        name: Some(C_FONT_NAME_DEFAULT.to_string()),
        size: Some(N_FONT_SIZE_DEFAULT),
        bold: Some(false),
        italic: Some(false),
        color: None,
    }
}
