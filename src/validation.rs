//! Pre-flight input validation
//!
//! Every check here runs before a request is built. A failure is reported as
//! [`UpayError::InvalidInput`] and the network is never touched.

use crate::{Result, UpayError};
use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use url::Url;

/// Smallest amount accepted by the API, in minor units (R$ 1,00)
pub const MIN_AMOUNT_CENTS: u64 = 100;

/// Minimum length of a payment link title
pub const MIN_TITLE_LEN: usize = 3;

/// Maximum length of a payment link description
pub const MAX_DESCRIPTION_LEN: usize = 5000;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// RFC 3986 unreserved characters stay as-is, everything else is escaped
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Require a non-empty string after trimming
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UpayError::invalid_input(field, "is required"));
    }
    Ok(())
}

/// Require an amount of at least [`MIN_AMOUNT_CENTS`]
pub fn validate_amount_cents(field: &str, amount: u64) -> Result<()> {
    if amount < MIN_AMOUNT_CENTS {
        return Err(UpayError::invalid_input(
            field,
            format!(
                "must be at least {} cents (R$ 1,00), got {}",
                MIN_AMOUNT_CENTS, amount
            ),
        ));
    }
    Ok(())
}

/// Check the basic `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Require a non-empty, well-formed email
pub fn validate_email(field: &str, email: &str) -> Result<()> {
    require_non_empty(field, email)?;
    if !is_valid_email(email.trim()) {
        return Err(UpayError::invalid_input(field, "is not a valid email"));
    }
    Ok(())
}

/// Require a payment link title of at least [`MIN_TITLE_LEN`] characters
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().chars().count() < MIN_TITLE_LEN {
        return Err(UpayError::invalid_input(
            "title",
            format!("must have at least {} characters", MIN_TITLE_LEN),
        ));
    }
    Ok(())
}

/// Limit a description to [`MAX_DESCRIPTION_LEN`] characters
pub fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(UpayError::invalid_input(
            "description",
            format!("must have at most {} characters", MAX_DESCRIPTION_LEN),
        ));
    }
    Ok(())
}

/// Trim and percent-encode an identifier for use as a single path segment
pub fn encode_path_segment(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UpayError::invalid_input(field, "is required"));
    }
    Ok(utf8_percent_encode(trimmed, PATH_SEGMENT).to_string())
}

/// Check an absolute http(s) URL
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| u.scheme() == "http" || u.scheme() == "https")
        .unwrap_or(false)
}

/// Check a UUID in its hyphenated form
pub fn is_valid_uuid(value: &str) -> bool {
    value.len() == 36 && uuid::Uuid::parse_str(value).is_ok()
}

/// Check a Brazilian CPF (11 digits) or CNPJ (14 digits), including check digits
///
/// Punctuation is ignored, so `123.456.789-09` and `12345678909` are equivalent.
pub fn is_valid_document(document: &str) -> bool {
    let digits: Vec<u32> = document.chars().filter_map(|c| c.to_digit(10)).collect();

    match digits.len() {
        11 => validate_cpf(&digits),
        14 => validate_cnpj(&digits),
        _ => false,
    }
}

fn all_same(digits: &[u32]) -> bool {
    digits.iter().all(|d| *d == digits[0])
}

fn validate_cpf(digits: &[u32]) -> bool {
    if all_same(digits) {
        return false;
    }

    let check = |len: usize| {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        let rem = (sum * 10) % 11;
        if rem == 10 {
            0
        } else {
            rem
        }
    };

    check(9) == digits[9] && check(10) == digits[10]
}

fn validate_cnpj(digits: &[u32]) -> bool {
    if all_same(digits) {
        return false;
    }

    const W1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const W2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    let check = |weights: &[u32]| {
        let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
        let rem = sum % 11;
        if rem < 2 {
            0
        } else {
            11 - rem
        }
    };

    check(&W1) == digits[12] && check(&W2) == digits[13]
}

/// Check that a card expiring in `year`/`month` is still usable
///
/// A card stays valid through the last day of its expiration month (UTC).
pub fn is_valid_expiration(year: i32, month: u32) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }

    let now = Utc::now();
    (year, month) >= (now.year(), now.month())
}
