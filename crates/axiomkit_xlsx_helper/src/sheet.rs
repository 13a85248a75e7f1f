//! Cell/sheet accessor traits and the in-memory worksheet model.
//!
//! Helpers and autofit only talk to [`SheetAccess`]/[`CellAccess`], so any
//! document model exposing these capabilities can be driven by them.
//! [`Worksheet`] is the buffered model flushed by [`crate::writer::XlsxWorkbook`].

use std::collections::BTreeMap;

use crate::spec::{
    EnumCellValue, Result, SpecCellAddress, SpecCellAlignment, SpecCellFill, SpecCellFont,
    SpecCellRange, XlsxHelperError,
};

////////////////////////////////////////////////////////////////////////////////
// #region AccessorTraits

/// Capabilities of a single cell.
pub trait CellAccess {
    fn value(&self) -> &EnumCellValue;
    fn set_value(&mut self, value: EnumCellValue);

    fn font(&self) -> Option<&SpecCellFont>;
    fn set_font(&mut self, font: SpecCellFont);

    fn alignment(&self) -> Option<&SpecCellAlignment>;
    /// Alignment for in-place edits, created empty when absent.
    fn alignment_mut(&mut self) -> &mut SpecCellAlignment;

    fn fill(&self) -> Option<&SpecCellFill>;
    fn set_fill(&mut self, fill: SpecCellFill);
}

/// Capabilities of a worksheet: cell lookup, column/row sizing and merges.
pub trait SheetAccess {
    type Cell: CellAccess;

    /// Existing cell at `address`, if any.
    fn cell(&self, address: &SpecCellAddress) -> Option<&Self::Cell>;
    /// Cell at `address`, created blank on first access.
    fn cell_mut(&mut self, address: &SpecCellAddress) -> &mut Self::Cell;
    /// Existing cells of one column in ascending row order.
    fn column_cells(&self, col_idx: u16)
    -> impl Iterator<Item = (SpecCellAddress, &Self::Cell)>;
    /// Column indices `0..=max` where `max` is the right-most used column.
    fn used_columns(&self) -> Vec<u16>;
    /// Rendered font size of a cell: its own font first, then the column font.
    fn cell_font_size(&self, address: &SpecCellAddress) -> Option<f64>;

    fn column_width(&self, col_idx: u16) -> Option<f64>;
    fn set_column_width(&mut self, col_idx: u16, width: f64);
    /// Font applied to cells of the column that carry no font of their own.
    fn set_column_font(&mut self, col_idx: u16, font: SpecCellFont);

    fn row_height(&self, row_idx: u32) -> Option<f64>;
    fn set_row_height(&mut self, row_idx: u32, height: f64);

    /// Register a merged region.
    fn merge_range(&mut self, range: SpecCellRange) -> Result<()>;
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region InMemoryModel

/// Buffered cell: value plus optional style parts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCell {
    pub value: EnumCellValue,
    pub font: Option<SpecCellFont>,
    pub alignment: Option<SpecCellAlignment>,
    pub fill: Option<SpecCellFill>,
}

impl CellAccess for SpecCell {
    fn value(&self) -> &EnumCellValue {
        &self.value
    }

    fn set_value(&mut self, value: EnumCellValue) {
        self.value = value;
    }

    fn font(&self) -> Option<&SpecCellFont> {
        self.font.as_ref()
    }

    fn set_font(&mut self, font: SpecCellFont) {
        self.font = Some(font);
    }

    fn alignment(&self) -> Option<&SpecCellAlignment> {
        self.alignment.as_ref()
    }

    fn alignment_mut(&mut self) -> &mut SpecCellAlignment {
        self.alignment.get_or_insert_with(SpecCellAlignment::default)
    }

    fn fill(&self) -> Option<&SpecCellFill> {
        self.fill.as_ref()
    }

    fn set_fill(&mut self, fill: SpecCellFill) {
        self.fill = Some(fill);
    }
}

/// In-memory worksheet.
///
/// Cells are keyed `(col_idx, row_idx)` so column scans come out in row order.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    name: String,
    if_right_to_left: bool,
    dict_cells: BTreeMap<(u16, u32), SpecCell>,
    dict_col_widths: BTreeMap<u16, f64>,
    dict_col_fonts: BTreeMap<u16, SpecCellFont>,
    dict_row_heights: BTreeMap<u32, f64>,
    l_merged_ranges: Vec<SpecCellRange>,
}

impl Worksheet {
    /// Create a detached sheet. Names are validated by the workbook.
    pub fn new(name: impl Into<String>, if_right_to_left: bool) -> Self {
        Self {
            name: name.into(),
            if_right_to_left,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_right_to_left(&self) -> bool {
        self.if_right_to_left
    }

    /// All stored cells, column-major.
    pub fn cells(&self) -> impl Iterator<Item = (SpecCellAddress, &SpecCell)> {
        self.dict_cells
            .iter()
            .map(|(&(col_idx, row_idx), cell)| (SpecCellAddress::new(row_idx, col_idx), cell))
    }

    pub fn column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.dict_col_widths
    }

    pub fn column_fonts(&self) -> &BTreeMap<u16, SpecCellFont> {
        &self.dict_col_fonts
    }

    pub fn row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.dict_row_heights
    }

    pub fn merged_ranges(&self) -> &[SpecCellRange] {
        &self.l_merged_ranges
    }

    /// Merged region anchored (top-left) at `address`.
    pub fn merged_range_at(&self, address: &SpecCellAddress) -> Option<&SpecCellRange> {
        self.l_merged_ranges
            .iter()
            .find(|range| range.start == *address)
    }

    /// Whether `address` lies inside a merge without being its anchor.
    pub fn is_covered_by_merge(&self, address: &SpecCellAddress) -> bool {
        self.l_merged_ranges
            .iter()
            .any(|range| range.contains(address) && range.start != *address)
    }

    /// Font rendered for a cell: column font overlaid with the cell's own font.
    pub fn effective_font(&self, address: &SpecCellAddress) -> Option<SpecCellFont> {
        let font_col = self.dict_col_fonts.get(&address.col_idx);
        let font_cell = self
            .dict_cells
            .get(&(address.col_idx, address.row_idx))
            .and_then(|cell| cell.font.as_ref());
        match (font_col, font_cell) {
            (Some(col), Some(cell)) => Some(col.merge(cell)),
            (Some(col), None) => Some(col.clone()),
            (None, Some(cell)) => Some(cell.clone()),
            (None, None) => None,
        }
    }
}

impl SheetAccess for Worksheet {
    type Cell = SpecCell;

    fn cell(&self, address: &SpecCellAddress) -> Option<&SpecCell> {
        self.dict_cells.get(&(address.col_idx, address.row_idx))
    }

    fn cell_mut(&mut self, address: &SpecCellAddress) -> &mut SpecCell {
        self.dict_cells
            .entry((address.col_idx, address.row_idx))
            .or_default()
    }

    fn column_cells(
        &self,
        col_idx: u16,
    ) -> impl Iterator<Item = (SpecCellAddress, &SpecCell)> {
        self.dict_cells
            .range((col_idx, 0)..=(col_idx, u32::MAX))
            .map(|(&(col_idx, row_idx), cell)| (SpecCellAddress::new(row_idx, col_idx), cell))
    }

    fn used_columns(&self) -> Vec<u16> {
        let n_col_max = [
            self.dict_cells.keys().map(|(col_idx, _)| *col_idx).max(),
            self.dict_col_widths.keys().max().copied(),
            self.dict_col_fonts.keys().max().copied(),
            self.l_merged_ranges
                .iter()
                .map(|range| range.end.col_idx)
                .max(),
        ]
        .into_iter()
        .flatten()
        .max();

        match n_col_max {
            Some(n_max) => (0..=n_max).collect(),
            None => vec![],
        }
    }

    fn cell_font_size(&self, address: &SpecCellAddress) -> Option<f64> {
        self.effective_font(address).and_then(|font| font.size)
    }

    fn column_width(&self, col_idx: u16) -> Option<f64> {
        self.dict_col_widths.get(&col_idx).copied()
    }

    fn set_column_width(&mut self, col_idx: u16, width: f64) {
        self.dict_col_widths.insert(col_idx, width);
    }

    fn set_column_font(&mut self, col_idx: u16, font: SpecCellFont) {
        self.dict_col_fonts.insert(col_idx, font);
    }

    fn row_height(&self, row_idx: u32) -> Option<f64> {
        self.dict_row_heights.get(&row_idx).copied()
    }

    fn set_row_height(&mut self, row_idx: u32, height: f64) {
        self.dict_row_heights.insert(row_idx, height);
    }

    fn merge_range(&mut self, range: SpecCellRange) -> Result<()> {
        if range.is_single_cell() {
            return Err(XlsxHelperError::InvalidRange(format!(
                "{range} spans a single cell; a merge needs at least two cells"
            )));
        }
        if let Some(existing) = self
            .l_merged_ranges
            .iter()
            .find(|existing| existing.intersects(&range))
        {
            return Err(XlsxHelperError::MergeConflict(
                range.to_string(),
                existing.to_string(),
            ));
        }
        self.l_merged_ranges.push(range);
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::parse_cell_range;

    fn addr(row_idx: u32, col_idx: u16) -> SpecCellAddress {
        SpecCellAddress::new(row_idx, col_idx)
    }

    #[test]
    fn test_cell_mut_creates_blank_cell_once() {
        let mut sheet = Worksheet::new("Data", false);
        assert!(sheet.cell(&addr(0, 0)).is_none());

        sheet.cell_mut(&addr(0, 0)).set_value("x".into());
        assert_eq!(sheet.cell(&addr(0, 0)).unwrap().value(), &EnumCellValue::from("x"));

        let cell = sheet.cell_mut(&addr(0, 0));
        assert_eq!(cell.value().as_str(), Some("x"));
    }

    #[test]
    fn test_alignment_mut_initializes_missing_alignment() {
        let mut cell = SpecCell::default();
        assert!(cell.alignment().is_none());
        cell.alignment_mut().wrap_text = true;
        assert_eq!(
            cell.alignment(),
            Some(&SpecCellAlignment {
                wrap_text: true,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_column_cells_iterates_one_column_in_row_order() {
        let mut sheet = Worksheet::new("Data", false);
        sheet.cell_mut(&addr(5, 1)).set_value("b6".into());
        sheet.cell_mut(&addr(0, 1)).set_value("b1".into());
        sheet.cell_mut(&addr(2, 0)).set_value("a3".into());
        sheet.cell_mut(&addr(1, 2)).set_value("c2".into());

        let l_rows: Vec<u32> = sheet
            .column_cells(1)
            .map(|(address, _)| address.row_number())
            .collect();
        assert_eq!(l_rows, vec![1, 6]);
    }

    #[test]
    fn test_used_columns_spans_to_right_most_column() {
        let mut sheet = Worksheet::new("Data", false);
        assert!(sheet.used_columns().is_empty());

        sheet.cell_mut(&addr(0, 2)).set_value(1.0.into());
        assert_eq!(sheet.used_columns(), vec![0, 1, 2]);

        sheet.set_column_width(4, 10.0);
        assert_eq!(sheet.used_columns(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_merge_range_rejects_overlap_and_single_cell() {
        let mut sheet = Worksheet::new("Data", false);
        sheet.merge_range(parse_cell_range("A1:B2").unwrap()).unwrap();

        let err = sheet
            .merge_range(parse_cell_range("B2:C3").unwrap())
            .unwrap_err();
        assert!(matches!(err, XlsxHelperError::MergeConflict(..)));

        let err = sheet.merge_range(parse_cell_range("D4").unwrap()).unwrap_err();
        assert!(matches!(err, XlsxHelperError::InvalidRange(_)));

        assert!(sheet.merged_range_at(&addr(0, 0)).is_some());
        assert!(sheet.is_covered_by_merge(&addr(1, 1)));
        assert!(!sheet.is_covered_by_merge(&addr(0, 0)));
    }

    #[test]
    fn test_effective_font_overlays_cell_font_on_column_font() {
        let mut sheet = Worksheet::new("Data", false);
        sheet.set_column_font(
            0,
            SpecCellFont {
                name: Some("Arial".to_string()),
                size: Some(12.0),
                ..Default::default()
            },
        );
        sheet.cell_mut(&addr(0, 0)).set_font(SpecCellFont {
            bold: Some(true),
            ..Default::default()
        });

        let font = sheet.effective_font(&addr(0, 0)).unwrap();
        assert_eq!(font.name.as_deref(), Some("Arial"));
        assert_eq!(font.bold, Some(true));

        let font = sheet.effective_font(&addr(3, 0)).unwrap();
        assert_eq!(font.bold, None);
        assert!(sheet.effective_font(&addr(0, 1)).is_none());
    }

    #[test]
    fn test_cell_font_size_falls_back_to_column_font() {
        let mut sheet = Worksheet::new("Data", false);
        sheet.cell_mut(&addr(0, 0)).set_value("plain".into());
        sheet.set_column_font(
            0,
            SpecCellFont {
                size: Some(20.0),
                ..Default::default()
            },
        );
        assert_eq!(sheet.cell_font_size(&addr(0, 0)), Some(20.0));

        sheet.cell_mut(&addr(1, 0)).set_font(SpecCellFont {
            size: Some(9.0),
            ..Default::default()
        });
        assert_eq!(sheet.cell_font_size(&addr(1, 0)), Some(9.0));
        assert_eq!(sheet.cell_font_size(&addr(0, 1)), None);
    }
}
