//! # Field Validators
//!
//! One pure function per checkout field. Each takes the raw, untrusted
//! form value and returns a [`FieldValidation`]: the cleaned value, or an
//! empty value plus the first failing check's [`FieldError`].
//!
//! The grammars are matched by hand rather than with regular expressions.
//! `\d` below is any Unicode decimal digit; the numeric fields come back
//! with their digits rewritten as ASCII.
//!
//! | Field | Grammar |
//! |-------|---------|
//! | card number | `\d{13,19}` after dropping spaces and hyphens, Luhn-valid |
//! | expiration | `(0[1-9]\|1[0-2])/\d{2}` |
//! | CVV | `\d{3,4}` |
//! | name | `[a-zA-ZáéíóúñÁÉÍÓÚÑ '-]{2,60}` after collapsing whitespace |
//! | email | `[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}` after lowercasing, at most 254 chars |

use crate::clock::{Clock, SystemClock};
use crate::error::FieldError;
use crate::luhn::luhn_is_valid;
use crate::normalize::{ascii_digits, is_form_whitespace, normalize};
use chrono::{DateTime, Datelike, Utc};
use unicode_normalization::UnicodeNormalization;

pub const CARD_MIN_DIGITS: usize = 13;
pub const CARD_MAX_DIGITS: usize = 19;
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 60;
pub const EMAIL_MAX_CHARS: usize = 254;

/// Accented letters accepted in a cardholder name, besides ASCII letters
const NAME_ACCENTED: &[char] = &['á', 'é', 'í', 'ó', 'ú', 'ñ', 'Á', 'É', 'Í', 'Ó', 'Ú', 'Ñ'];

/// Outcome of validating a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    /// Cleaned value, empty when the field is invalid
    pub clean: String,
    /// Why the field was rejected, `None` when valid
    pub error: Option<FieldError>,
}

impl FieldValidation {
    /// A passing field with its cleaned value
    pub fn ok(clean: impl Into<String>) -> Self {
        Self {
            clean: clean.into(),
            error: None,
        }
    }

    /// A failing field. The clean value is always empty.
    pub fn fail(error: FieldError) -> Self {
        Self {
            clean: String::new(),
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Error message, or an empty string when valid
    pub fn error_message(&self) -> String {
        self.error.map(|e| e.message()).unwrap_or_default()
    }

    /// `(clean, error_message)` with an empty message on success
    pub fn into_pair(self) -> (String, String) {
        let message = self.error_message();
        (self.clean, message)
    }
}

/// Validate a card number.
///
/// Interior spaces and hyphens are dropped. Checks run in order
/// digits-only, length, Luhn; only the first failure is reported.
pub fn validate_card_number(raw: &str) -> FieldValidation {
    let compact: String = normalize(raw)
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    let Some(digits) = ascii_digits(&compact) else {
        return FieldValidation::fail(FieldError::CardDigitsOnly);
    };
    if !(CARD_MIN_DIGITS..=CARD_MAX_DIGITS).contains(&digits.len()) {
        return FieldValidation::fail(FieldError::CardLength);
    }
    if !luhn_is_valid(&digits) {
        return FieldValidation::fail(FieldError::CardChecksum);
    }

    FieldValidation::ok(digits)
}

/// Validate an `MM/YY` expiration date against the wall clock
pub fn validate_exp_date(raw: &str) -> FieldValidation {
    validate_exp_date_at(raw, SystemClock.now())
}

/// Validate an `MM/YY` expiration date against `now`.
///
/// The two-digit year is read as `now`'s century, so a card dated a
/// century ahead is reported expired.
pub fn validate_exp_date_at(raw: &str, now: DateTime<Utc>) -> FieldValidation {
    if raw.is_empty() {
        return FieldValidation::fail(FieldError::ExpDateRequired);
    }

    let Some((month, year)) = parse_mm_yy(&normalize(raw)) else {
        return FieldValidation::fail(FieldError::ExpDateFormat);
    };

    if !(1..=12).contains(&month) {
        return FieldValidation::fail(FieldError::ExpMonthRange);
    }

    let current_year = now.year().rem_euclid(100) as u32;
    let current_month = now.month();
    if year < current_year || (year == current_year && month < current_month) {
        return FieldValidation::fail(FieldError::CardExpired);
    }

    FieldValidation::ok(format!("{:02}/{:02}", month, year))
}

/// Validate a CVV.
///
/// The value is NFKC-folded but not trimmed, so surrounding whitespace is
/// a digits-only failure.
///
/// The clean value is empty even on success: a CVV is never handed back
/// for storage or display. Callers must use `error.is_none()` as the
/// success signal for this field.
pub fn validate_cvv(raw: &str) -> FieldValidation {
    if raw.is_empty() {
        return FieldValidation::fail(FieldError::CvvRequired);
    }
    let folded: String = raw.nfkc().collect();
    let Some(digits) = ascii_digits(&folded) else {
        return FieldValidation::fail(FieldError::CvvDigitsOnly);
    };
    if !matches!(digits.len(), 3 | 4) {
        return FieldValidation::fail(FieldError::CvvLength);
    }

    FieldValidation::ok(String::new())
}

/// Validate the cardholder name; runs of whitespace collapse to one space
pub fn validate_name_on_card(raw: &str) -> FieldValidation {
    let name = normalize(raw)
        .split(is_form_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return FieldValidation::fail(FieldError::NameLength);
    }
    if !name.chars().all(is_name_char) {
        return FieldValidation::fail(FieldError::NameCharacters);
    }

    FieldValidation::ok(name)
}

/// Validate the billing email; the clean value is lowercased
pub fn validate_billing_email(raw: &str) -> FieldValidation {
    let email = normalize(raw).to_lowercase();

    if email.chars().count() > EMAIL_MAX_CHARS {
        return FieldValidation::fail(FieldError::EmailLength);
    }
    if !is_basic_email(&email) {
        return FieldValidation::fail(FieldError::EmailFormat);
    }

    FieldValidation::ok(email)
}

/// Parse `MM/YY` where `MM` is `01`..`12`, digits in any script.
/// Returns `(month, year)`.
fn parse_mm_yy(s: &str) -> Option<(u32, u32)> {
    let (month, year) = s.split_once('/')?;
    let folded = format!("{}/{}", ascii_digits(month)?, ascii_digits(year)?);
    let b = folded.as_bytes();
    if b.len() != 5 || b[2] != b'/' {
        return None;
    }

    let month_ok = match (b[0], b[1]) {
        (b'0', b'1'..=b'9') => true,
        (b'1', b'0'..=b'2') => true,
        _ => false,
    };
    if !month_ok {
        return None;
    }

    let two = |hi: u8, lo: u8| u32::from(hi - b'0') * 10 + u32::from(lo - b'0');
    Some((two(b[0], b[1]), two(b[3], b[4])))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || NAME_ACCENTED.contains(&c) || matches!(c, ' ' | '\'' | '-')
}

fn is_email_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_email_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

/// `local@domain.tld` where the top-level label is 2+ ASCII letters
fn is_basic_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_email_local_char) {
        return false;
    }

    // The TLD holds no dots, so the last dot is the only possible split.
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty()
        && host.chars().all(is_email_domain_char)
        && tld.len() >= 2
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn june_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    // Card number

    #[test]
    fn test_card_number_valid() {
        let result = validate_card_number("4539578763621486");
        assert_eq!(result, FieldValidation::ok("4539578763621486"));
    }

    #[test]
    fn test_card_number_strips_separators() {
        assert_eq!(
            validate_card_number(" 4539-5787 6362-1486 ").clean,
            "4539578763621486"
        );
        assert_eq!(
            validate_card_number("4111 1111 1111 1111").clean,
            "4111111111111111"
        );
    }

    #[test]
    fn test_card_number_full_width_digits() {
        let result = validate_card_number("４１１１１１１１１１１１１１１１");
        assert!(result.is_valid());
        assert_eq!(result.clean, "4111111111111111");
    }

    #[test]
    fn test_card_number_other_script_digits() {
        // Arabic-Indic and Devanagari renderings of 4539 5787 6362 1486
        let arabic = "\u{0664}\u{0665}\u{0663}\u{0669} \u{0665}\u{0667}\u{0668}\u{0667} \
                      \u{0666}\u{0663}\u{0666}\u{0662} \u{0661}\u{0664}\u{0668}\u{0666}";
        assert_eq!(validate_card_number(arabic), FieldValidation::ok("4539578763621486"));

        let devanagari: String = "4539578763621486"
            .chars()
            .map(|c| char::from_u32(0x0966 + (c as u32 - '0' as u32)).unwrap())
            .collect();
        assert_eq!(validate_card_number(&devanagari).clean, "4539578763621486");

        // A transposition is still caught after folding
        let typo = "\u{0665}\u{0664}\u{0663}\u{0669}578763621486";
        assert_eq!(validate_card_number(typo).error, Some(FieldError::CardChecksum));
    }

    #[test]
    fn test_card_number_non_digit() {
        for raw in ["4111x11111111111", "", "   ", "4111_1111_1111_1111", "4111\t1111111111111"] {
            let result = validate_card_number(raw);
            assert_eq!(result.clean, "");
            assert_eq!(result.error, Some(FieldError::CardDigitsOnly), "input {:?}", raw);
        }
    }

    #[test]
    fn test_card_number_length() {
        assert_eq!(
            validate_card_number("411111111111").error,
            Some(FieldError::CardLength)
        );
        assert_eq!(
            validate_card_number("41111111111111111111").error,
            Some(FieldError::CardLength)
        );
    }

    #[test]
    fn test_card_number_checksum() {
        let result = validate_card_number("1234567890123");
        assert_eq!(result.error, Some(FieldError::CardChecksum));
        assert_eq!(result.clean, "");
    }

    #[test]
    fn test_card_number_check_order() {
        // Too short and non-numeric: the format error wins
        assert_eq!(validate_card_number("12a").error, Some(FieldError::CardDigitsOnly));
        // Too short and bad checksum: the length error wins
        assert_eq!(validate_card_number("1234").error, Some(FieldError::CardLength));
    }

    // Expiration date

    #[test]
    fn test_exp_date_required() {
        let (clean, error) = validate_exp_date_at("", june_2024()).into_pair();
        assert_eq!(clean, "");
        assert_eq!(error, "Expiration date is required");
    }

    #[test]
    fn test_exp_date_format() {
        for raw in ["13/25", "00/25", "1/25", "01-25", "01/2025", "ab/cd", "   ", "01/2½"] {
            assert_eq!(
                validate_exp_date_at(raw, june_2024()).error,
                Some(FieldError::ExpDateFormat),
                "input {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_exp_date_expiry_boundaries() {
        let now = june_2024();
        assert_eq!(
            validate_exp_date_at("05/24", now).error,
            Some(FieldError::CardExpired)
        );
        assert_eq!(
            validate_exp_date_at("12/23", now).error,
            Some(FieldError::CardExpired)
        );
        assert_eq!(validate_exp_date_at("06/24", now), FieldValidation::ok("06/24"));
        assert_eq!(validate_exp_date_at("07/24", now), FieldValidation::ok("07/24"));
        assert_eq!(validate_exp_date_at("01/25", now), FieldValidation::ok("01/25"));
    }

    #[test]
    fn test_exp_date_trims() {
        assert_eq!(
            validate_exp_date_at("  08/27 ", june_2024()),
            FieldValidation::ok("08/27")
        );
    }

    #[test]
    fn test_exp_date_folds_digits() {
        let now = june_2024();
        assert_eq!(validate_exp_date_at("01/２９", now), FieldValidation::ok("01/29"));
        assert_eq!(validate_exp_date_at("０１/２５", now), FieldValidation::ok("01/25"));
        assert_eq!(
            validate_exp_date_at("\u{0660}\u{0668}/\u{0662}\u{0667}", now),
            FieldValidation::ok("08/27")
        );
        assert_eq!(
            validate_exp_date_at("01/\u{0662}\u{0663}", now).error,
            Some(FieldError::CardExpired)
        );
    }

    #[test]
    fn test_exp_date_two_digit_year_wraps() {
        // In 2099, "01/00" means 2000, not 2100
        let now = Utc.with_ymd_and_hms(2099, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            validate_exp_date_at("01/00", now).error,
            Some(FieldError::CardExpired)
        );
    }

    #[test]
    fn test_exp_date_wall_clock() {
        assert_eq!(validate_exp_date("01/00").error, Some(FieldError::CardExpired));
        assert_eq!(validate_exp_date("12/99").error, None);
    }

    // CVV

    #[test]
    fn test_cvv_valid_withholds_value() {
        for raw in ["123", "1234"] {
            let result = validate_cvv(raw);
            assert!(result.is_valid());
            assert_eq!(result.clean, "");
        }
    }

    #[test]
    fn test_cvv_invalid() {
        assert_eq!(validate_cvv("").error, Some(FieldError::CvvRequired));
        assert_eq!(validate_cvv("12a").error, Some(FieldError::CvvDigitsOnly));
        assert_eq!(validate_cvv(" 123").error, Some(FieldError::CvvDigitsOnly));
        assert_eq!(validate_cvv("12").error, Some(FieldError::CvvLength));
        assert_eq!(validate_cvv("12345").error, Some(FieldError::CvvLength));
        assert_eq!(validate_cvv("\u{0661}\u{0662}").error, Some(FieldError::CvvLength));
    }

    #[test]
    fn test_cvv_other_script_digits() {
        for raw in ["１２３", "\u{0661}\u{0662}\u{0663}", "\u{0967}\u{0968}\u{0969}\u{096A}"] {
            assert_eq!(validate_cvv(raw), FieldValidation::ok(""), "input {:?}", raw);
        }
        assert_eq!(validate_cvv("１２３ ").error, Some(FieldError::CvvDigitsOnly));
    }

    // Name on card

    #[test]
    fn test_name_collapses_whitespace() {
        let (clean, error) = validate_name_on_card("  John   Doe  ").into_pair();
        assert_eq!(clean, "John Doe");
        assert_eq!(error, "");

        assert_eq!(validate_name_on_card("Ana\t\nMaría").clean, "Ana María");
    }

    #[test]
    fn test_name_separator_controls_are_whitespace() {
        assert_eq!(validate_name_on_card("John\u{1f}Doe").clean, "John Doe");
        assert_eq!(validate_name_on_card("\u{1c}Ann\u{1d}\u{1e} Lee").clean, "Ann Lee");
        assert_eq!(
            validate_name_on_card("John\u{1b}Doe").error,
            Some(FieldError::NameCharacters)
        );
    }

    #[test]
    fn test_name_full_width_input() {
        assert_eq!(validate_name_on_card("Ｊｏｈｎ　Ｄｏｅ").clean, "John Doe");
    }

    #[test]
    fn test_name_accepts_accents_and_punctuation() {
        for raw in ["José Núñez", "Mary-Jane O'Neil", "ÁNGEL", "Jose\u{0301}"] {
            assert!(validate_name_on_card(raw).is_valid(), "input {:?}", raw);
        }
    }

    #[test]
    fn test_name_rejects_other_characters() {
        for raw in ["John123", "John.Doe", "Jürgen", "Zoë", "李雷"] {
            assert_eq!(
                validate_name_on_card(raw).error,
                Some(FieldError::NameCharacters),
                "input {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_name_length() {
        assert_eq!(validate_name_on_card("J").error, Some(FieldError::NameLength));
        assert_eq!(validate_name_on_card("Jo"), FieldValidation::ok("Jo"));
        assert_eq!(validate_name_on_card(" Ñ'  "), FieldValidation::ok("Ñ'"));
        assert_eq!(validate_name_on_card("   ").error, Some(FieldError::NameLength));
        assert!(validate_name_on_card(&"a".repeat(60)).is_valid());
        assert_eq!(
            validate_name_on_card(&"a".repeat(61)).error,
            Some(FieldError::NameLength)
        );
        // Length is counted after collapsing
        assert!(validate_name_on_card(&format!("{}     {}", "a".repeat(29), "b".repeat(30))).is_valid());
    }

    #[test]
    fn test_name_length_checked_before_characters() {
        assert_eq!(validate_name_on_card("1").error, Some(FieldError::NameLength));
    }

    // Billing email

    #[test]
    fn test_email_lowercases() {
        let (clean, error) = validate_billing_email("User@Example.COM").into_pair();
        assert_eq!(clean, "user@example.com");
        assert_eq!(error, "");
    }

    #[test]
    fn test_email_accepts() {
        for raw in ["a.b+tag@sub.example.co", "x_y%z@host-name.io", " me@ex.org "] {
            assert!(validate_billing_email(raw).is_valid(), "input {:?}", raw);
        }
    }

    #[test]
    fn test_email_rejects() {
        for raw in [
            "not-an-email",
            "",
            "@example.com",
            "user@",
            "user@example",
            "user@.com",
            "user@example.c",
            "user@example.c0m",
            "us er@example.com",
            "user@@example.com",
            "user@exa_mple.com",
        ] {
            assert_eq!(
                validate_billing_email(raw).error,
                Some(FieldError::EmailFormat),
                "input {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_email_length() {
        // 242 + "@example.com" is exactly 254
        let at_limit = format!("{}@example.com", "a".repeat(242));
        assert_eq!(at_limit.chars().count(), EMAIL_MAX_CHARS);
        assert_eq!(validate_billing_email(&at_limit), FieldValidation::ok(at_limit.clone()));

        let over = format!("{}@example.com", "a".repeat(243));
        assert_eq!(validate_billing_email(&over).error, Some(FieldError::EmailLength));

        // Counted after trimming
        assert!(validate_billing_email(&format!("  {}  ", at_limit)).is_valid());
    }

    #[test]
    fn test_email_full_width_input() {
        assert_eq!(
            validate_billing_email("ｕｓｅｒ@ｅｘａｍｐｌｅ.ｃｏｍ"),
            FieldValidation::ok("user@example.com")
        );
        assert_eq!(
            validate_billing_email("ＵＳＥＲ＠Ｅｘａｍｐｌｅ．ＯＲＧ"),
            FieldValidation::ok("user@example.org")
        );
    }

    #[test]
    fn test_email_double_dot_domain_matches_grammar() {
        // The domain class includes '.', so consecutive dots are accepted
        assert!(validate_billing_email("user@example..com").is_valid());
    }
}
