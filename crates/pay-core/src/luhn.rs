//! # Luhn Checksum
//!
//! Mod-10 check used by the card number validator.

/// Returns true if `digits` is a non-empty ASCII digit string that passes
/// the Luhn checksum.
///
/// Walking from the rightmost digit (position 0), every odd position is
/// doubled and folded back to one digit by subtracting 9 when it exceeds 9.
pub fn luhn_is_valid(digits: &str) -> bool {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}
