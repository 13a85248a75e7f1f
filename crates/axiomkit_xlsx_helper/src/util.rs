//! Stateless helper utilities shared by helpers and the workbook writer.

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{Result, XlsxHelperError};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColorParsing

/// Parse `RRGGBB` / `AARRGGBB` hex (optional leading `#`) into `0xRRGGBB`.
///
/// The alpha byte is accepted but dropped; XLSX fills and fonts are opaque.
pub fn parse_argb_color(color: &str) -> Result<u32> {
    let c_hex = color.trim().trim_start_matches('#');
    if !c_hex.chars().all(|chr| chr.is_ascii_hexdigit()) {
        return Err(XlsxHelperError::InvalidColor(color.to_string()));
    }
    let c_rgb = match c_hex.len() {
        6 => c_hex,
        8 => &c_hex[2..],
        _ => return Err(XlsxHelperError::InvalidColor(color.to_string())),
    };
    u32::from_str_radix(c_rgb, 16).map_err(|_| XlsxHelperError::InvalidColor(color.to_string()))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
