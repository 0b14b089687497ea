//! # Input Normalization
//!
//! NFKC-folds raw form input and trims surrounding whitespace.
//! Full-width digits, compatibility ligatures and decomposed accents all
//! come out in one canonical form before any grammar is checked.
//!
//! Also holds the digit folding shared by the numeric fields: any Unicode
//! decimal digit (general category `Nd`) is accepted and rewritten to
//! ASCII before lengths, checksums or dates are computed.

use unicode_normalization::UnicodeNormalization;

/// First code point of every run of ten decimal digits (`Nd`), Unicode 15
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Whitespace as form input sees it: Unicode `White_Space` plus the
/// ASCII information separators U+001C..U+001F
pub fn is_form_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Normalize a raw field value: NFKC, then trim.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let folded: String = raw.nfkc().collect();
    folded.trim_matches(is_form_whitespace).to_string()
}

/// Value of `c` if it is a decimal digit in any script
pub fn decimal_digit_value(c: char) -> Option<u8> {
    let cp = u32::from(c);
    let idx = DECIMAL_ZEROS.partition_point(|&zero| zero <= cp);
    let zero = DECIMAL_ZEROS.get(idx.checked_sub(1)?)?;
    let value = cp - zero;
    (value < 10).then_some(value as u8)
}

/// Rewrite a run of decimal digits as ASCII `0-9`.
///
/// `None` when `s` is empty or holds anything that is not a decimal digit.
pub fn ascii_digits(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }
    s.chars()
        .map(|c| decimal_digit_value(c).map(|d| char::from(b'0' + d)))
        .collect()
}
