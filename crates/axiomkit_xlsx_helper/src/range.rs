//! A1 address parsing and range expansion.
//!
//! Column letters use base-26 arithmetic (`A`=0 ... `Z`=25, `AA`=26), so
//! ranges crossing `Z` expand correctly.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::spec::{Result, SpecCellAddress, SpecCellRange, XlsxHelperError};

static RE_CELL_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("cell address pattern must compile")
});

static RE_COLUMN_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("column letters pattern must compile"));

////////////////////////////////////////////////////////////////////////////////
// #region ColumnLetters

/// Convert column letters to a zero-based index (`A` -> 0, `AA` -> 26).
pub fn column_letters_to_index(letters: &str) -> Result<u16> {
    if !RE_COLUMN_LETTERS.is_match(letters) {
        return Err(XlsxHelperError::InvalidColumn(letters.to_string()));
    }

    let mut n_col: u64 = 0;
    for chr in letters.chars() {
        n_col = n_col * 26 + u64::from(chr.to_ascii_uppercase() as u8 - b'A' + 1);
        if n_col > u64::from(N_NCOLS_EXCEL_MAX) {
            return Err(XlsxHelperError::ColumnOutOfBounds(n_col, N_NCOLS_EXCEL_MAX));
        }
    }

    Ok((n_col - 1) as u16)
}

/// Convert a zero-based column index to letters (`0` -> `A`, `26` -> `AA`).
pub fn column_index_to_letters(col_idx: u16) -> String {
    let mut c_letters = String::new();
    let mut n = u32::from(col_idx) + 1;
    while n > 0 {
        n -= 1;
        c_letters.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    c_letters
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AddressParsing

/// Parse one A1-style address; letters are case-insensitive.
pub fn parse_cell_address(text: &str) -> Result<SpecCellAddress> {
    let c_text = text.trim();
    let Some(caps) = RE_CELL_ADDRESS.captures(c_text) else {
        return Err(XlsxHelperError::InvalidAddress(text.to_string()));
    };

    let col_idx = column_letters_to_index(&caps[1])?;

    let n_row: u64 = caps[2]
        .parse()
        .map_err(|_| XlsxHelperError::InvalidAddress(text.to_string()))?;
    if n_row == 0 || n_row > u64::from(N_NROWS_EXCEL_MAX) {
        return Err(XlsxHelperError::RowOutOfBounds(n_row, N_NROWS_EXCEL_MAX));
    }

    Ok(SpecCellAddress::new((n_row - 1) as u32, col_idx))
}

/// Parse `"<start>:<end>"`; a bare address is a one-cell range.
///
/// Corners may be given in any order.
pub fn parse_cell_range(text: &str) -> Result<SpecCellRange> {
    let l_parts: Vec<&str> = text.split(':').collect();
    match l_parts.as_slice() {
        [c_single] => {
            let address = parse_cell_address(c_single)?;
            Ok(SpecCellRange::from_corners(address, address))
        }
        [c_start, c_end] => Ok(SpecCellRange::from_corners(
            parse_cell_address(c_start)?,
            parse_cell_address(c_end)?,
        )),
        _ => Err(XlsxHelperError::InvalidRange(text.to_string())),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RangeExpansion

/// Enumerate every address of a range, column-major (all rows of a column
/// before the next column).
pub fn derive_range_addresses(range: &SpecCellRange) -> Vec<SpecCellAddress> {
    let mut l_addresses = Vec::new();
    for col_idx in range.start.col_idx..=range.end.col_idx {
        for row_idx in range.start.row_idx..=range.end.row_idx {
            l_addresses.push(SpecCellAddress::new(row_idx, col_idx));
        }
    }
    l_addresses
}

/// Expand an optional range plus optional explicit addresses into a unique,
/// ordered address list.
///
/// Range-derived addresses come first (column-major), explicit ones follow in
/// the given order, and only the first occurrence of each address is kept.
/// Both inputs absent yields an empty list.
pub fn expand_cell_refs(
    range: Option<&str>,
    cells: Option<&[&str]>,
) -> Result<Vec<SpecCellAddress>> {
    let mut l_candidates = Vec::new();

    if let Some(c_range) = range {
        l_candidates.extend(derive_range_addresses(&parse_cell_range(c_range)?));
    }

    if let Some(l_cells) = cells {
        for c_cell in l_cells {
            l_candidates.push(parse_cell_address(c_cell)?);
        }
    }

    let n_candidates = l_candidates.len();
    let mut set_seen = BTreeSet::new();
    l_candidates.retain(|address| set_seen.insert(*address));

    log::debug!(
        "expanded cell refs: range={range:?} explicit={} -> {} unique of {n_candidates}",
        cells.map_or(0, |l_cells| l_cells.len()),
        l_candidates.len()
    );

    Ok(l_candidates)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
