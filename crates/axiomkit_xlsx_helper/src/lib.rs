//! `axiomkit_xlsx_helper` v1:
//! Rust-side XLSX convenience helpers.
//!
//! Architecture:
//! - `conf`    : constants and default presets
//! - `spec`    : models/policies/errors
//! - `range`   : A1 parsing and range expansion
//! - `measure` : text width measurement
//! - `sheet`   : accessor traits and in-memory worksheet
//! - `autofit` : column width fitting
//! - `helper`  : merge/value/style/color/sizing helpers
//! - `util`    : pure helper functions
//! - `writer`  : workbook model saved through `rust_xlsxwriter`
pub mod autofit;
pub mod conf;
pub mod helper;
pub mod measure;
pub mod range;
pub mod sheet;
pub mod spec;
pub mod util;
pub mod writer;

pub use autofit::{
    calculate_column_width, fit_column_width_to_text, fit_columns_width_to_text,
    resolve_column_index,
};
pub use conf::{
    N_FONT_SIZE_AUTOFIT_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    N_PIXELS_PER_EXCEL_WIDTH_UNIT, N_WIDTH_AUTOFIT_PADDING, TUP_EXCEL_ILLEGAL,
};
pub use helper::{
    align_center, align_center_cells, apply_to_cells, create_sheet, create_workbook, merge_cells,
    merge_range, read_font, read_value, save_workbook, set_cell_background_color,
    set_cell_text_color, set_cells_background_color, set_cells_text_color, set_column_width,
    set_font_in_all_empty_cells, set_row_height, set_value, wrap_text, wrap_text_cells,
};
pub use measure::{ArialWidthTable, TextMeasure};
pub use range::{
    column_index_to_letters, column_letters_to_index, expand_cell_refs, parse_cell_address,
    parse_cell_range,
};
pub use sheet::{CellAccess, SheetAccess, SpecCell, Worksheet};
pub use spec::{
    EnumCellValue, EnumColumnIdentifier, EnumHorizontalAlign, EnumVerticalAlign, Result,
    SpecAutofitPolicy, SpecCellAddress, SpecCellAlignment, SpecCellFill, SpecCellFont,
    SpecCellRange, SpecColumnWidth, XlsxHelperError,
};
pub use util::{parse_argb_color, sanitize_sheet_name};
pub use writer::XlsxWorkbook;
