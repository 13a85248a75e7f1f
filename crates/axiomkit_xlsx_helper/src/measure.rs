//! Text width measurement used by column autofit.

/// Measure rendered text width in pixels.
pub trait TextMeasure {
    /// Pixel width of `text` rendered at `font_size` points.
    fn measure_pixel_width(&self, text: &str, font_size: f64) -> f64;
}

/// Arial advance widths (1/1000 em) for printable ASCII `0x20..=0x7E`.
const TUP_ARIAL_ADVANCE_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Arial advance widths (1/1000 em) for Latin-1 `0xA0..=0xFF`.
const TUP_ARIAL_ADVANCE_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..¯
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // °..¿
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // À..Ï
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Ð..ß
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // à..ï
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // ð..ÿ
];

/// Advance used for tabs and other control characters.
const N_ARIAL_ADVANCE_CONTROL: u16 = 0;
/// Advance used beyond Latin-1 (CJK and other wide glyphs dominate).
const N_ARIAL_ADVANCE_NON_ASCII: u16 = 1000;

/// Width table estimator based on Arial regular metrics.
///
/// Text at font size `s` is `s * sum(advance) / 1000` pixels wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArialWidthTable;

impl ArialWidthTable {
    fn advance(chr: char) -> u16 {
        match chr {
            ' '..='~' => TUP_ARIAL_ADVANCE_ASCII[(chr as usize) - 0x20],
            '\u{a0}'..='\u{ff}' => TUP_ARIAL_ADVANCE_LATIN1[(chr as usize) - 0xA0],
            _ if chr.is_control() => N_ARIAL_ADVANCE_CONTROL,
            _ => N_ARIAL_ADVANCE_NON_ASCII,
        }
    }
}

impl TextMeasure for ArialWidthTable {
    fn measure_pixel_width(&self, text: &str, font_size: f64) -> f64 {
        let n_units: u64 = text.chars().map(|chr| u64::from(Self::advance(chr))).sum();
        n_units as f64 * font_size / 1000.0
    }
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f64) -> f64,
{
    fn measure_pixel_width(&self, text: &str, font_size: f64) -> f64 {
        self(text, font_size)
    }
}
