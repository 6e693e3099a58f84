//! Display formatting for response fields.
//!
//! Everything here is a total function over non-null input. Callers check
//! presence first; absent fields never reach these helpers.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use phonenumber::{country, Mode};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::decode::Address;

/// Display order of address parts.
pub const ADDRESS_KEYS: [&str; 4] = ["address1", "city", "state", "zip"];

/// Minor units per major unit (cents per dollar).
pub const MINOR_UNITS_SCALE: u32 = 2;

pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

// ============================================================================
// Address / name
// ============================================================================

/// Join the present address parts with `", "`.
///
/// Parts are taken in [`ADDRESS_KEYS`] order; empty parts are skipped.
/// `None` gives the empty string.
pub fn serialize_address(address: Option<&Address>) -> String {
    let Some(address) = address else {
        return String::new();
    };
    ADDRESS_KEYS
        .iter()
        .filter_map(|key| address.part(key))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `"first last"`, or just `first` when there is no last name.
pub fn serialize_name(first: &str, last: Option<&str>) -> String {
    match last {
        Some(last) if !last.is_empty() => format!("{first} {last}"),
        _ => first.to_string(),
    }
}

// ============================================================================
// Numbers / dates
// ============================================================================

/// Two decimals with `,` thousands grouping, e.g. `1,234.50`.
pub fn format_number(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(MINOR_UNITS_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Minor units to major units, divided by 100 here and nowhere else.
pub fn minor_to_major(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_UNITS_SCALE)
}

pub fn format_minor_units(minor: i64) -> String {
    format_number(minor_to_major(minor))
}

/// Render `at` with a strftime pattern.
///
/// An unusable pattern falls back to ISO `YYYY-MM-DD` rather than failing.
pub fn format_date(at: &DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(pattern)).is_err() {
        tracing::warn!(pattern, "unusable date format, falling back to ISO date");
        return at.format("%Y-%m-%d").to_string();
    }
    out
}

// ============================================================================
// Phone
// ============================================================================

/// Dialing region assumed for numbers stored without a country code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhoneRegion {
    #[default]
    Us,
    Ca,
}

impl PhoneRegion {
    pub fn country(self) -> country::Id {
        match self {
            PhoneRegion::Us => country::US,
            PhoneRegion::Ca => country::CA,
        }
    }
}

impl std::str::FromStr for PhoneRegion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(PhoneRegion::Us),
            "CA" => Ok(PhoneRegion::Ca),
            other => Err(format!("unsupported phone region `{other}`")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PhoneError {
    #[error("phone number is empty")]
    Empty,

    #[error("unparsable phone number: {0}")]
    Parse(#[from] phonenumber::ParseError),
}

/// National-format rendering through libphonenumber, e.g. `(312) 555-0142`.
///
/// Anything libphonenumber can parse is formatted, valid or not; extensions,
/// vanity letters and `/` separators included. Never panics on bad input.
pub fn format_phone_national(raw: &str, region: PhoneRegion) -> std::result::Result<String, PhoneError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PhoneError::Empty);
    }
    let number = phonenumber::parse(Some(region.country()), trimmed)?;
    Ok(number.format().mode(Mode::National).to_string())
}
