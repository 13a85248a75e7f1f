//! Column autofit: size columns to their widest rendered text.
//!
//! Widths are a function of final cell content, so call this after all values
//! and fonts of the target columns are written.

use std::collections::BTreeSet;

use crate::measure::{ArialWidthTable, TextMeasure};
use crate::range::column_letters_to_index;
use crate::sheet::{CellAccess, SheetAccess};
use crate::spec::{
    EnumColumnIdentifier, Result, SpecAutofitPolicy, SpecColumnWidth, XlsxHelperError,
};

/// Resolve a column identifier to a zero-based index.
pub fn resolve_column_index(column: &EnumColumnIdentifier) -> Result<u16> {
    match column {
        EnumColumnIdentifier::Letters(letters) => column_letters_to_index(letters.trim()),
        EnumColumnIdentifier::Index(col_idx) => Ok(*col_idx),
    }
}

fn validate_policy_autofit(policy: &SpecAutofitPolicy) -> Result<()> {
    if !(policy.pixels_per_width_unit.is_finite() && policy.pixels_per_width_unit > 0.0) {
        return Err(XlsxHelperError::InvalidPolicy(
            "pixels_per_width_unit must be > 0.".to_string(),
        ));
    }
    if !(policy.font_size_default.is_finite() && policy.font_size_default > 0.0) {
        return Err(XlsxHelperError::InvalidPolicy(
            "font_size_default must be > 0.".to_string(),
        ));
    }
    if !(policy.width_padding.is_finite() && policy.width_padding >= 0.0) {
        return Err(XlsxHelperError::InvalidPolicy(
            "width_padding must be >= 0.".to_string(),
        ));
    }
    Ok(())
}

/// Compute a column's width without assigning it.
///
/// `rows_ignored` holds 1-based row numbers as shown in Excel. Only string
/// cells count; a column without strings gets `width_padding`.
pub fn calculate_column_width<S, M>(
    sheet: &S,
    col_idx: u16,
    rows_ignored: &BTreeSet<u32>,
    policy: &SpecAutofitPolicy,
    measure: &M,
) -> f64
where
    S: SheetAccess,
    M: TextMeasure + ?Sized,
{
    let mut n_width_px_max = 0.0_f64;

    for (address, cell) in sheet.column_cells(col_idx) {
        if rows_ignored.contains(&address.row_number()) {
            continue;
        }
        let Some(text) = cell.value().as_str() else {
            continue;
        };

        let n_font_size = sheet
            .cell_font_size(&address)
            .unwrap_or(policy.font_size_default);
        n_width_px_max = n_width_px_max.max(measure.measure_pixel_width(text, n_font_size));
    }

    n_width_px_max / policy.pixels_per_width_unit + policy.width_padding
}

/// Fit each column (in the given order) to its widest string cell.
///
/// Returns the widths that were assigned.
pub fn fit_columns_width_to_text<S, M>(
    sheet: &mut S,
    columns: &[EnumColumnIdentifier],
    rows_ignored: &BTreeSet<u32>,
    policy: &SpecAutofitPolicy,
    measure: &M,
) -> Result<Vec<SpecColumnWidth>>
where
    S: SheetAccess,
    M: TextMeasure + ?Sized,
{
    validate_policy_autofit(policy)?;

    let l_cols_idx = columns
        .iter()
        .map(resolve_column_index)
        .collect::<Result<Vec<_>>>()?;

    let mut l_widths = Vec::with_capacity(l_cols_idx.len());
    for col_idx in l_cols_idx {
        let n_width = calculate_column_width(sheet, col_idx, rows_ignored, policy, measure);
        sheet.set_column_width(col_idx, n_width);
        log::debug!(
            "autofit column {} -> width {n_width:.2}",
            crate::range::column_index_to_letters(col_idx)
        );
        l_widths.push(SpecColumnWidth {
            col_idx,
            width: n_width,
        });
    }

    Ok(l_widths)
}

/// Fit one column with the default policy and Arial width table.
pub fn fit_column_width_to_text<S: SheetAccess>(
    sheet: &mut S,
    column: impl Into<EnumColumnIdentifier>,
) -> Result<SpecColumnWidth> {
    let l_widths = fit_columns_width_to_text(
        sheet,
        &[column.into()],
        &BTreeSet::new(),
        &SpecAutofitPolicy::default(),
        &ArialWidthTable,
    )?;
    l_widths
        .into_iter()
        .next()
        .ok_or_else(|| XlsxHelperError::InvalidColumn("no column resolved".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Worksheet;
    use crate::spec::{EnumCellValue, SpecCellAddress, SpecCellFont};

    /// Stub measurer with fixed widths for known strings.
    fn measure_stub(text: &str, _font_size: f64) -> f64 {
        match text {
            "hi" => 20.0,
            "hello world" => 80.0,
            "longest by far" => 200.0,
            _ => text.len() as f64,
        }
    }

    fn put(sheet: &mut Worksheet, row_number: u32, col_idx: u16, value: impl Into<EnumCellValue>) {
        sheet
            .cell_mut(&SpecCellAddress::new(row_number - 1, col_idx))
            .set_value(value.into());
    }

    fn fit_a(sheet: &mut Worksheet, rows_ignored: &[u32]) -> f64 {
        let l_widths = fit_columns_width_to_text(
            sheet,
            &["A".into()],
            &rows_ignored.iter().copied().collect(),
            &SpecAutofitPolicy::default(),
            &measure_stub,
        )
        .unwrap();
        l_widths[0].width
    }

    #[test]
    fn test_fit_uses_widest_string() {
        let mut sheet = Worksheet::new("Data", false);
        put(&mut sheet, 1, 0, "hi");
        put(&mut sheet, 2, 0, "hello world");

        let n_width = fit_a(&mut sheet, &[]);
        assert!((n_width - (80.0 / 6.0 + 1.0)).abs() < 1e-9);
        assert_eq!(sheet.column_width(0), Some(n_width));
    }

    #[test]
    fn test_fit_non_string_column_gets_padding_only() {
        let mut sheet = Worksheet::new("Data", false);
        put(&mut sheet, 1, 0, 42.0);
        put(&mut sheet, 2, 0, true);

        assert_eq!(fit_a(&mut sheet, &[]), 1.0);
    }

    #[test]
    fn test_fit_empty_column_gets_padding_only() {
        let mut sheet = Worksheet::new("Data", false);
        assert_eq!(fit_a(&mut sheet, &[]), 1.0);
        assert_eq!(sheet.column_width(0), Some(1.0));
    }

    #[test]
    fn test_fit_skips_ignored_rows() {
        let mut sheet = Worksheet::new("Data", false);
        put(&mut sheet, 1, 0, "hi");
        put(&mut sheet, 2, 0, "longest by far");
        put(&mut sheet, 3, 0, "hello world");

        let n_width = fit_a(&mut sheet, &[2]);
        assert!((n_width - (80.0 / 6.0 + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fit_passes_cell_font_size_or_default() {
        let mut sheet = Worksheet::new("Data", false);
        put(&mut sheet, 1, 0, "a");
        put(&mut sheet, 2, 0, "b");
        sheet
            .cell_mut(&SpecCellAddress::new(1, 0))
            .set_font(SpecCellFont {
                size: Some(30.0),
                ..Default::default()
            });

        let measure_by_size = |_text: &str, font_size: f64| font_size;
        let l_widths = fit_columns_width_to_text(
            &mut sheet,
            &[EnumColumnIdentifier::Index(0)],
            &BTreeSet::new(),
            &SpecAutofitPolicy::default(),
            &measure_by_size,
        )
        .unwrap();
        assert!((l_widths[0].width - (30.0 / 6.0 + 1.0)).abs() < 1e-9);

        sheet
            .cell_mut(&SpecCellAddress::new(1, 0))
            .set_value(7.0.into());
        let l_widths = fit_columns_width_to_text(
            &mut sheet,
            &[EnumColumnIdentifier::Index(0)],
            &BTreeSet::new(),
            &SpecAutofitPolicy::default(),
            &measure_by_size,
        )
        .unwrap();
        assert!((l_widths[0].width - (11.0 / 6.0 + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fit_uses_column_font_size_for_cells_without_font() {
        let mut sheet = Worksheet::new("Data", false);
        put(&mut sheet, 1, 0, "hello");
        sheet.set_column_font(
            0,
            SpecCellFont {
                size: Some(20.0),
                ..Default::default()
            },
        );

        let measure_by_size = |_text: &str, font_size: f64| font_size;
        let l_widths = fit_columns_width_to_text(
            &mut sheet,
            &["A".into()],
            &BTreeSet::new(),
            &SpecAutofitPolicy::default(),
            &measure_by_size,
        )
        .unwrap();
        assert!((l_widths[0].width - (20.0 / 6.0 + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fit_columns_are_independent_and_ordered() {
        let mut sheet = Worksheet::new("Data", false);
        put(&mut sheet, 1, 0, "hello world");
        put(&mut sheet, 1, 1, "hi");

        let l_widths = fit_columns_width_to_text(
            &mut sheet,
            &["B".into(), "A".into()],
            &BTreeSet::new(),
            &SpecAutofitPolicy::default(),
            &measure_stub,
        )
        .unwrap();

        assert_eq!(l_widths[0].col_idx, 1);
        assert!((l_widths[0].width - (20.0 / 6.0 + 1.0)).abs() < 1e-9);
        assert_eq!(l_widths[1].col_idx, 0);
        assert!((l_widths[1].width - (80.0 / 6.0 + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fit_rejects_bad_column_and_policy() {
        let mut sheet = Worksheet::new("Data", false);
        let err = fit_columns_width_to_text(
            &mut sheet,
            &["A1".into()],
            &BTreeSet::new(),
            &SpecAutofitPolicy::default(),
            &measure_stub,
        )
        .unwrap_err();
        assert!(matches!(err, XlsxHelperError::InvalidColumn(_)));

        let policy = SpecAutofitPolicy {
            pixels_per_width_unit: 0.0,
            ..Default::default()
        };
        let err = fit_columns_width_to_text(
            &mut sheet,
            &["A".into()],
            &BTreeSet::new(),
            &policy,
            &measure_stub,
        )
        .unwrap_err();
        assert!(matches!(err, XlsxHelperError::InvalidPolicy(_)));
        assert!(sheet.column_width(0).is_none());
    }

    #[test]
    fn test_fit_single_column_with_default_measure() {
        let mut sheet = Worksheet::new("Data", false);
        put(&mut sheet, 1, 2, "hello");

        let width = fit_column_width_to_text(&mut sheet, "C").unwrap();
        let n_expected = ArialWidthTable.measure_pixel_width("hello", 11.0) / 6.0 + 1.0;
        assert_eq!(width.col_idx, 2);
        assert!((width.width - n_expected).abs() < 1e-9);
    }
}
