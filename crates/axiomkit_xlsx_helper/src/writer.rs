//! Workbook model that buffers worksheets and writes them with `rust_xlsxwriter`.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatPattern, Workbook};

use crate::conf::N_WIDTH_EXCEL_COLUMN_MAX;
use crate::sheet::{SheetAccess, Worksheet};
use crate::spec::{
    EnumCellValue, EnumHorizontalAlign, EnumVerticalAlign, Result, SpecCellAddress,
    SpecCellAlignment, SpecCellFill, SpecCellFont, XlsxHelperError,
};
use crate::util::{parse_argb_color, sanitize_sheet_name};

/// Stateful workbook: an ordered set of uniquely named worksheets.
///
/// Nothing touches disk until [`Self::save`] is called.
#[derive(Debug, Clone, Default)]
pub struct XlsxWorkbook {
    l_sheets: Vec<Worksheet>,
}

impl XlsxWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a worksheet and return it for editing.
    ///
    /// The name is sanitized to Excel rules first; a name equal (ignoring case)
    /// to an existing sheet is rejected.
    pub fn add_worksheet(&mut self, name: &str, if_right_to_left: bool) -> Result<&mut Worksheet> {
        let c_name = sanitize_sheet_name(name, "_");
        if c_name != name {
            log::warn!("sheet name {name:?} sanitized to {c_name:?}");
        }
        if self
            .l_sheets
            .iter()
            .any(|sheet| sheet.name().eq_ignore_ascii_case(&c_name))
        {
            return Err(XlsxHelperError::DuplicateSheetName(c_name));
        }

        self.l_sheets.push(Worksheet::new(c_name, if_right_to_left));
        let n_idx_last = self.l_sheets.len() - 1;
        Ok(&mut self.l_sheets[n_idx_last])
    }

    pub fn worksheet(&self, name: &str) -> Result<&Worksheet> {
        self.l_sheets
            .iter()
            .find(|sheet| sheet.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| XlsxHelperError::SheetNotFound(name.to_string()))
    }

    pub fn worksheet_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.l_sheets
            .iter_mut()
            .find(|sheet| sheet.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| XlsxHelperError::SheetNotFound(name.to_string()))
    }

    /// Sheet names in insertion order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.l_sheets.iter().map(Worksheet::name).collect()
    }

    /// Write the workbook to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut workbook = self.build_workbook()?;
        workbook.save(path)?;
        log::info!(
            "saved workbook with {} sheet(s) to {}",
            self.l_sheets.len(),
            path.display()
        );
        Ok(())
    }

    /// Serialize the workbook to XLSX bytes.
    pub fn save_to_buffer(&self) -> Result<Vec<u8>> {
        let mut workbook = self.build_workbook()?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build_workbook(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        for sheet in &self.l_sheets {
            write_sheet(&mut workbook, sheet)?;
        }
        Ok(workbook)
    }
}

fn write_sheet(workbook: &mut Workbook, sheet: &Worksheet) -> Result<()> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.name())?;
    if sheet.is_right_to_left() {
        worksheet.set_right_to_left(true);
    }

    for (col_idx, font) in sheet.column_fonts() {
        let format = derive_rust_xlsx_format(Some(font), None, None)?;
        worksheet.set_column_format(*col_idx, &format)?;
    }
    for (col_idx, width) in sheet.column_widths() {
        if *width > N_WIDTH_EXCEL_COLUMN_MAX {
            log::warn!(
                "column {col_idx} width {width:.2} clamped to {N_WIDTH_EXCEL_COLUMN_MAX}"
            );
        }
        worksheet.set_column_width(*col_idx, width.min(N_WIDTH_EXCEL_COLUMN_MAX))?;
    }
    for (row_idx, height) in sheet.row_heights() {
        worksheet.set_row_height(*row_idx, *height)?;
    }

    for range in sheet.merged_ranges() {
        let format = derive_cell_format(sheet, &range.start)?;
        let c_text = sheet
            .cell(&range.start)
            .and_then(|cell| cell.value.as_str())
            .unwrap_or_default();
        worksheet.merge_range(
            range.start.row_idx,
            range.start.col_idx,
            range.end.row_idx,
            range.end.col_idx,
            c_text,
            &format,
        )?;
    }

    for (address, cell) in sheet.cells() {
        if sheet.is_covered_by_merge(&address) {
            continue;
        }
        if sheet.merged_range_at(&address).is_some()
            && matches!(cell.value, EnumCellValue::String(_) | EnumCellValue::None)
        {
            continue;
        }

        let format = derive_cell_format(sheet, &address)?;
        let (n_row, n_col) = (address.row_idx, address.col_idx);
        match &cell.value {
            EnumCellValue::None => {
                worksheet.write_blank(n_row, n_col, &format)?;
            }
            EnumCellValue::String(val) => {
                worksheet.write_string_with_format(n_row, n_col, val, &format)?;
            }
            EnumCellValue::Number(val) => {
                worksheet.write_number_with_format(n_row, n_col, *val, &format)?;
            }
            EnumCellValue::Boolean(val) => {
                worksheet.write_boolean_with_format(n_row, n_col, *val, &format)?;
            }
            EnumCellValue::Formula(val) => {
                worksheet.write_formula_with_format(n_row, n_col, val.as_str(), &format)?;
            }
        }
    }

    Ok(())
}

fn derive_cell_format(sheet: &Worksheet, address: &SpecCellAddress) -> Result<Format> {
    let font = sheet.effective_font(address);
    let cell = sheet.cell(address);
    derive_rust_xlsx_format(
        font.as_ref(),
        cell.and_then(|cell| cell.alignment.as_ref()),
        cell.and_then(|cell| cell.fill.as_ref()),
    )
}

/// Convert buffered style parts into a `rust_xlsxwriter` format.
pub fn derive_rust_xlsx_format(
    font: Option<&SpecCellFont>,
    alignment: Option<&SpecCellAlignment>,
    fill: Option<&SpecCellFill>,
) -> Result<Format> {
    let mut format = Format::new();

    if let Some(font) = font {
        if let Some(val) = &font.name {
            format = format.set_font_name(val.as_str());
        }
        if let Some(val) = font.size {
            format = format.set_font_size(val);
        }
        if font.bold.unwrap_or(false) {
            format = format.set_bold();
        }
        if font.italic.unwrap_or(false) {
            format = format.set_italic();
        }
        if let Some(val) = &font.color {
            format = format.set_font_color(Color::RGB(parse_argb_color(val)?));
        }
    }

    if let Some(alignment) = alignment {
        if let Some(val) = alignment.horizontal {
            format = format.set_align(derive_format_align_horizontal(val));
        }
        if let Some(val) = alignment.vertical {
            format = format.set_align(derive_format_align_vertical(val));
        }
        if alignment.wrap_text {
            format = format.set_text_wrap();
        }
    }

    if let Some(fill) = fill {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(parse_argb_color(&fill.color)?));
    }

    Ok(format)
}

fn derive_format_align_horizontal(align: EnumHorizontalAlign) -> FormatAlign {
    match align {
        EnumHorizontalAlign::Left => FormatAlign::Left,
        EnumHorizontalAlign::Center => FormatAlign::Center,
        EnumHorizontalAlign::Right => FormatAlign::Right,
        EnumHorizontalAlign::Fill => FormatAlign::Fill,
        EnumHorizontalAlign::Justify => FormatAlign::Justify,
        EnumHorizontalAlign::CenterAcross => FormatAlign::CenterAcross,
        EnumHorizontalAlign::Distributed => FormatAlign::Distributed,
    }
}

fn derive_format_align_vertical(align: EnumVerticalAlign) -> FormatAlign {
    match align {
        EnumVerticalAlign::Top => FormatAlign::Top,
        EnumVerticalAlign::Middle => FormatAlign::VerticalCenter,
        EnumVerticalAlign::Bottom => FormatAlign::Bottom,
        EnumVerticalAlign::Justify => FormatAlign::VerticalJustify,
        EnumVerticalAlign::Distributed => FormatAlign::VerticalDistributed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::parse_cell_range;
    use crate::sheet::CellAccess;

    fn build_sample_workbook() -> XlsxWorkbook {
        let mut workbook = XlsxWorkbook::new();
        let sheet = workbook.add_worksheet("Report", true).unwrap();

        let a1 = SpecCellAddress::new(0, 0);
        sheet.cell_mut(&a1).set_value("Title".into());
        sheet.cell_mut(&a1).alignment_mut().horizontal = Some(EnumHorizontalAlign::Center);
        sheet.merge_range(parse_cell_range("A1:C1").unwrap()).unwrap();

        sheet
            .cell_mut(&SpecCellAddress::new(1, 0))
            .set_value(42.0.into());
        sheet
            .cell_mut(&SpecCellAddress::new(1, 1))
            .set_value(true.into());
        sheet
            .cell_mut(&SpecCellAddress::new(1, 2))
            .set_value(EnumCellValue::Formula("=A2*2".to_string()));
        sheet
            .cell_mut(&SpecCellAddress::new(2, 0))
            .set_fill(SpecCellFill {
                color: "FFFFFF00".to_string(),
            });

        sheet.set_column_width(0, 14.5);
        sheet.set_column_font(
            1,
            SpecCellFont {
                name: Some("Arial".to_string()),
                ..Default::default()
            },
        );
        sheet.set_row_height(0, 30.0);
        workbook
    }

    #[test]
    fn test_add_worksheet_sanitizes_and_rejects_duplicates() {
        let mut workbook = XlsxWorkbook::new();
        workbook.add_worksheet("Data:2024", false).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Data_2024"]);

        let err = workbook.add_worksheet("data_2024", false).unwrap_err();
        assert!(matches!(err, XlsxHelperError::DuplicateSheetName(_)));

        assert!(workbook.worksheet("DATA_2024").is_ok());
        assert!(matches!(
            workbook.worksheet("missing"),
            Err(XlsxHelperError::SheetNotFound(_))
        ));
    }

    #[test]
    fn test_worksheet_mut_edits_earlier_sheet() {
        let mut workbook = XlsxWorkbook::new();
        workbook.add_worksheet("Input", false).unwrap();
        workbook.add_worksheet("Output", false).unwrap();

        let a1 = SpecCellAddress::new(0, 0);
        workbook
            .worksheet_mut("input")
            .unwrap()
            .cell_mut(&a1)
            .set_value("edited".into());

        let sheet = workbook.worksheet("Input").unwrap();
        assert_eq!(sheet.cell(&a1).unwrap().value.as_str(), Some("edited"));
        assert!(workbook.worksheet("Output").unwrap().cell(&a1).is_none());
        assert!(matches!(
            workbook.worksheet_mut("missing"),
            Err(XlsxHelperError::SheetNotFound(_))
        ));
    }

    #[test]
    fn test_save_to_buffer_produces_zip() {
        let workbook = build_sample_workbook();
        let v_bytes = workbook.save_to_buffer().unwrap();
        assert!(v_bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_save_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("report.xlsx");

        build_sample_workbook().save(&path).unwrap();

        let v_bytes = std::fs::read(&path).unwrap();
        assert!(v_bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_save_propagates_invalid_color() {
        let mut workbook = XlsxWorkbook::new();
        workbook
            .add_worksheet("Data", false)
            .unwrap()
            .cell_mut(&SpecCellAddress::new(0, 0))
            .set_fill(SpecCellFill {
                color: "not-a-color".to_string(),
            });

        let err = workbook.save_to_buffer().unwrap_err();
        assert!(matches!(err, XlsxHelperError::InvalidColor(_)));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing").join("out.xlsx");

        let err = build_sample_workbook().save(&path).unwrap_err();
        assert!(matches!(err, XlsxHelperError::Xlsx(_)));
    }
}
