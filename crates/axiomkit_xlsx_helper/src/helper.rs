//! Convenience helpers: merging, values, fonts, alignment, colors and sizing.
//!
//! Every helper takes A1-style references and works on any [`SheetAccess`].
//! The `*_cells` variants accept an optional range plus optional explicit
//! addresses, expanded by [`expand_cell_refs`].

use std::path::Path;

use crate::autofit::resolve_column_index;
use crate::conf::{N_NROWS_EXCEL_MAX, derive_default_font};
use crate::range::{expand_cell_refs, parse_cell_address, parse_cell_range};
use crate::sheet::{CellAccess, SheetAccess, Worksheet};
use crate::spec::{
    EnumCellValue, EnumColumnIdentifier, EnumHorizontalAlign, EnumVerticalAlign, Result,
    SpecCellFill, SpecCellFont, SpecCellRange, XlsxHelperError,
};
use crate::util::parse_argb_color;
use crate::writer::XlsxWorkbook;

////////////////////////////////////////////////////////////////////////////////
// #region WorkbookHelpers

/// Start a new, empty workbook.
pub fn create_workbook() -> XlsxWorkbook {
    XlsxWorkbook::new()
}

/// Add a sheet, optionally right-to-left.
pub fn create_sheet<'a>(
    workbook: &'a mut XlsxWorkbook,
    sheet_name: &str,
    if_right_to_left: bool,
) -> Result<&'a mut Worksheet> {
    workbook.add_worksheet(sheet_name, if_right_to_left)
}

/// Save the workbook at `path`.
pub fn save_workbook(workbook: &XlsxWorkbook, path: impl AsRef<Path>) -> Result<()> {
    workbook.save(path)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellHelpers

/// Merge `cell_start:cell_end` into one region.
pub fn merge_cells<S: SheetAccess>(sheet: &mut S, cell_start: &str, cell_end: &str) -> Result<()> {
    let range = SpecCellRange::from_corners(
        parse_cell_address(cell_start)?,
        parse_cell_address(cell_end)?,
    );
    sheet.merge_range(range)
}

/// Merge a range given as `"A1:C3"`.
pub fn merge_range<S: SheetAccess>(sheet: &mut S, range: &str) -> Result<()> {
    sheet.merge_range(parse_cell_range(range)?)
}

/// Read a cell value; missing cells read as [`EnumCellValue::None`].
pub fn read_value<S: SheetAccess>(sheet: &S, cell_ref: &str) -> Result<EnumCellValue> {
    let address = parse_cell_address(cell_ref)?;
    Ok(sheet
        .cell(&address)
        .map(|cell| cell.value().clone())
        .unwrap_or_default())
}

/// Read a cell's own font, if one was set.
pub fn read_font<S: SheetAccess>(sheet: &S, cell_ref: &str) -> Result<Option<SpecCellFont>> {
    let address = parse_cell_address(cell_ref)?;
    Ok(sheet.cell(&address).and_then(|cell| cell.font().cloned()))
}

/// Write a value and its font.
///
/// `font` is overlaid on the default (Arial 12, regular); `None` uses the
/// default as is.
pub fn set_value<S: SheetAccess>(
    sheet: &mut S,
    cell_ref: &str,
    value: impl Into<EnumCellValue>,
    font: Option<&SpecCellFont>,
) -> Result<()> {
    let address = parse_cell_address(cell_ref)?;
    let font_final = match font {
        Some(font) => derive_default_font().merge(font),
        None => derive_default_font(),
    };
    if let Some(c_color) = &font_final.color {
        parse_argb_color(c_color)?;
    }

    let cell = sheet.cell_mut(&address);
    cell.set_value(value.into());
    cell.set_font(font_final);
    Ok(())
}

/// Give every used column a default font, shown by cells without their own.
pub fn set_font_in_all_empty_cells<S: SheetAccess>(sheet: &mut S, font: &SpecCellFont) {
    let l_cols_idx = sheet.used_columns();
    if l_cols_idx.is_empty() {
        log::warn!("set_font_in_all_empty_cells: sheet has no used columns");
    }
    for col_idx in l_cols_idx {
        sheet.set_column_font(col_idx, font.clone());
    }
}

/// Turn on text wrapping for one cell.
pub fn wrap_text<S: SheetAccess>(sheet: &mut S, cell_ref: &str) -> Result<()> {
    wrap_text_cells(sheet, None, Some(&[cell_ref][..])).map(|_| ())
}

/// Center one cell horizontally and vertically.
pub fn align_center<S: SheetAccess>(sheet: &mut S, cell_ref: &str) -> Result<()> {
    align_center_cells(sheet, None, Some(&[cell_ref][..])).map(|_| ())
}

/// Fill one cell with a solid background color (`AARRGGBB` / `RRGGBB`).
pub fn set_cell_background_color<S: SheetAccess>(
    sheet: &mut S,
    cell_ref: &str,
    color: &str,
) -> Result<()> {
    set_cells_background_color(sheet, None, Some(&[cell_ref][..]), color).map(|_| ())
}

/// Set the text color of one cell, keeping its other font attributes.
pub fn set_cell_text_color<S: SheetAccess>(
    sheet: &mut S,
    cell_ref: &str,
    color: &str,
) -> Result<()> {
    set_cells_text_color(sheet, None, Some(&[cell_ref][..]), color).map(|_| ())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RangeHelpers

/// Apply `apply` to every cell selected by `range` and `cells`.
///
/// Returns the number of distinct cells touched.
pub fn apply_to_cells<S, F>(
    sheet: &mut S,
    range: Option<&str>,
    cells: Option<&[&str]>,
    mut apply: F,
) -> Result<usize>
where
    S: SheetAccess,
    F: FnMut(&mut S::Cell),
{
    let l_addresses = expand_cell_refs(range, cells)?;
    for address in &l_addresses {
        apply(sheet.cell_mut(address));
    }
    Ok(l_addresses.len())
}

pub fn wrap_text_cells<S: SheetAccess>(
    sheet: &mut S,
    range: Option<&str>,
    cells: Option<&[&str]>,
) -> Result<usize> {
    apply_to_cells(sheet, range, cells, |cell| {
        cell.alignment_mut().wrap_text = true;
    })
}

pub fn align_center_cells<S: SheetAccess>(
    sheet: &mut S,
    range: Option<&str>,
    cells: Option<&[&str]>,
) -> Result<usize> {
    apply_to_cells(sheet, range, cells, |cell| {
        let alignment = cell.alignment_mut();
        alignment.vertical = Some(EnumVerticalAlign::Middle);
        alignment.horizontal = Some(EnumHorizontalAlign::Center);
    })
}

pub fn set_cells_background_color<S: SheetAccess>(
    sheet: &mut S,
    range: Option<&str>,
    cells: Option<&[&str]>,
    color: &str,
) -> Result<usize> {
    parse_argb_color(color)?;
    apply_to_cells(sheet, range, cells, |cell| {
        cell.set_fill(SpecCellFill {
            color: color.to_string(),
        });
    })
}

pub fn set_cells_text_color<S: SheetAccess>(
    sheet: &mut S,
    range: Option<&str>,
    cells: Option<&[&str]>,
    color: &str,
) -> Result<usize> {
    parse_argb_color(color)?;
    apply_to_cells(sheet, range, cells, |cell| {
        let font = cell.font().cloned().unwrap_or_default().merge(&SpecCellFont {
            color: Some(color.to_string()),
            ..Default::default()
        });
        cell.set_font(font);
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SizingHelpers

fn validate_dimension(name: &'static str, value: f64) -> Result<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(XlsxHelperError::InvalidDimension(name, value));
    }
    Ok(())
}

/// Set a row height in points; `row_number` is 1-based.
pub fn set_row_height<S: SheetAccess>(sheet: &mut S, row_number: u32, height: f64) -> Result<()> {
    if row_number == 0 || row_number > N_NROWS_EXCEL_MAX {
        return Err(XlsxHelperError::RowOutOfBounds(
            u64::from(row_number),
            N_NROWS_EXCEL_MAX,
        ));
    }
    validate_dimension("row height", height)?;
    sheet.set_row_height(row_number - 1, height);
    Ok(())
}

/// Set a column width in Excel width units.
pub fn set_column_width<S: SheetAccess>(
    sheet: &mut S,
    column: impl Into<EnumColumnIdentifier>,
    width: f64,
) -> Result<()> {
    let col_idx = resolve_column_index(&column.into())?;
    validate_dimension("column width", width)?;
    sheet.set_column_width(col_idx, width);
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
