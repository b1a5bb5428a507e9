//! STX / micro-STX conversion.

use crate::clarity::{EncodeError, parse_uint};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{borrow::Cow, fmt};

/// Number of decimals of the native token.
pub const DECIMALS: usize = 6;

/// Micro-STX per STX.
pub const MICRO_PER_STX: u128 = 1_000_000;

/// Converts a decimal amount of STX into micro-STX, truncating digits below the minor unit.
///
/// `"1.9999999"` becomes `1_999_999`. Exponent notation, as JSON floats render, is accepted:
/// `"1.23e-6"` becomes `1`. Negative and non-numeric inputs fail.
pub fn to_minor_units(amount: &str) -> Result<u128, EncodeError> {
    let amount = amount.trim();
    if amount.starts_with('-') {
        return Err(EncodeError::NegativeInteger(amount.to_string()));
    }
    let expanded = expand_exponent(amount)?;
    let amount = expanded.as_ref();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let invalid = || EncodeError::InvalidInteger(amount.to_string());
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole = if whole.is_empty() { 0 } else { parse_uint(whole).map_err(|_| invalid())? };
    let fraction: String = fraction.chars().chain(std::iter::repeat('0')).take(DECIMALS).collect();
    let fraction: u128 = fraction.parse().map_err(|_| invalid())?;

    whole
        .checked_mul(MICRO_PER_STX)
        .and_then(|micro| micro.checked_add(fraction))
        .ok_or_else(|| EncodeError::IntegerOverflow(amount.to_string()))
}

/// Rewrites `<mantissa>e<exponent>` as a plain decimal. Other inputs pass through unchanged.
fn expand_exponent(amount: &str) -> Result<Cow<'_, str>, EncodeError> {
    let Some((mantissa, exponent)) = amount.split_once(['e', 'E']) else {
        return Ok(Cow::Borrowed(amount));
    };
    let invalid = || EncodeError::InvalidInteger(amount.to_string());
    let exponent: i64 = exponent.parse().map_err(|_| invalid())?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if (whole.is_empty() && fraction.is_empty())
        || !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let digits = format!("{whole}{fraction}");
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(Cow::Borrowed("0"));
    }
    // position of the decimal point relative to the first significant digit
    let point = (whole.len() as i64 - (digits.len() - significant.len()) as i64)
        .checked_add(exponent)
        .ok_or_else(invalid)?;
    // u128::MAX has 39 digits
    if point > 39 {
        return Err(EncodeError::IntegerOverflow(amount.to_string()));
    }
    if point <= -(DECIMALS as i64) {
        return Ok(Cow::Borrowed("0"));
    }
    let expanded = if point <= 0 {
        format!("0.{}{significant}", "0".repeat(point.unsigned_abs() as usize))
    } else if point as usize >= significant.len() {
        format!("{significant}{}", "0".repeat(point as usize - significant.len()))
    } else {
        let (whole, fraction) = significant.split_at(point as usize);
        format!("{whole}.{fraction}")
    };
    Ok(Cow::Owned(expanded))
}

/// Converts micro-STX into STX for display.
pub fn to_major_units(micro: u128) -> f64 {
    micro as f64 / MICRO_PER_STX as f64
}

/// Formats micro-STX as an exact decimal STX string, without trailing zeros.
pub fn format_major_units(micro: u128) -> String {
    let whole = micro / MICRO_PER_STX;
    let fraction = micro % MICRO_PER_STX;
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{fraction:06}");
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

/// An amount expressed in whole STX, as entered by a user.
///
/// Deserializes from a JSON number or a decimal string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StxAmount(String);

impl StxAmount {
    pub fn new(amount: impl Into<String>) -> Self {
        Self(amount.into())
    }

    /// The amount in micro-STX.
    pub fn to_micro(&self) -> Result<u128, EncodeError> {
        to_minor_units(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for StxAmount {
    fn from(stx: u64) -> Self {
        Self(stx.to_string())
    }
}

impl From<&str> for StxAmount {
    fn from(stx: &str) -> Self {
        Self(stx.to_string())
    }
}

impl fmt::Display for StxAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} STX", self.0)
    }
}

impl Serialize for StxAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StxAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::serde_helpers::numeric_string::deserialize(deserializer).map(Self)
    }
}
