//! Clarity literal encoding.
//!
//! Contract calls take their arguments as Clarity literals: `u100` for unsigned integers,
//! `'ST...` for principals, `"..."` for ASCII strings, `u"..."` for UTF-8 strings and
//! `true`/`false` for booleans. [`ClarityValue::encode`] produces these deterministically and
//! [`EncodedArg::parse`] reads them back.

use crate::{address::StacksAddress, contract::ContractIdentifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised when a value violates its kind's encoding precondition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("unsigned integer must be non-negative, got `{0}`")]
    NegativeInteger(String),
    #[error("unsigned integer must be integral, got `{0}`")]
    NonIntegral(String),
    #[error("`{0}` is not a valid unsigned integer")]
    InvalidInteger(String),
    #[error("unsigned integer `{0}` does not fit in 128 bits")]
    IntegerOverflow(String),
    #[error("ascii string contains non-ascii characters: {0:?}")]
    NonAscii(String),
    #[error("string of {len} bytes exceeds the maximum of {max}")]
    StringTooLong { len: usize, max: usize },
    #[error("invalid principal `{0}`")]
    InvalidPrincipal(String),
    #[error("invalid clarity literal `{0}`")]
    InvalidLiteral(String),
}

/// The kind tag of an encoded argument.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum ArgKind {
    #[serde(rename = "uint")]
    #[strum(serialize = "uint")]
    Uint,
    #[serde(rename = "principal")]
    #[strum(serialize = "principal")]
    Principal,
    #[serde(rename = "ascii-string")]
    #[strum(serialize = "ascii-string")]
    AsciiString,
    #[serde(rename = "utf8-string")]
    #[strum(serialize = "utf8-string")]
    Utf8String,
    #[serde(rename = "bool")]
    #[strum(serialize = "bool")]
    Bool,
}

/// A typed value that can be passed to a contract function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClarityValue {
    Uint(u128),
    Principal(String),
    AsciiString(String),
    Utf8String(String),
    Bool(bool),
}

impl ClarityValue {
    pub fn principal(address: &StacksAddress) -> Self {
        Self::Principal(address.to_string())
    }

    pub fn kind(&self) -> ArgKind {
        match self {
            Self::Uint(_) => ArgKind::Uint,
            Self::Principal(_) => ArgKind::Principal,
            Self::AsciiString(_) => ArgKind::AsciiString,
            Self::Utf8String(_) => ArgKind::Utf8String,
            Self::Bool(_) => ArgKind::Bool,
        }
    }

    /// Encodes the value into its literal form.
    pub fn encode(&self) -> Result<EncodedArg, EncodeError> {
        let literal = match self {
            Self::Uint(n) => format!("u{n}"),
            Self::Principal(p) => {
                validate_principal(p)?;
                format!("'{p}")
            }
            Self::AsciiString(s) => {
                if !s.is_ascii() {
                    return Err(EncodeError::NonAscii(s.clone()));
                }
                format!("\"{}\"", escape(s))
            }
            Self::Utf8String(s) => format!("u\"{}\"", escape(s)),
            Self::Bool(b) => b.to_string(),
        };
        Ok(EncodedArg { kind: self.kind(), literal })
    }
}

/// Parses a decimal string into an unsigned integer.
///
/// Negative and fractional inputs are rejected rather than clamped or truncated.
pub fn parse_uint(s: &str) -> Result<u128, EncodeError> {
    let s = s.trim();
    if s.starts_with('-') {
        return Err(EncodeError::NegativeInteger(s.to_string()));
    }
    if s.contains('.') || s.contains(['e', 'E']) {
        return Err(EncodeError::NonIntegral(s.to_string()));
    }
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodeError::InvalidInteger(s.to_string()));
    }
    s.parse().map_err(|_| EncodeError::IntegerOverflow(s.to_string()))
}

/// A standard principal is an address; a contract principal is `address.contract-name`.
fn validate_principal(p: &str) -> Result<(), EncodeError> {
    let valid = if p.contains('.') {
        ContractIdentifier::parse(p).is_ok()
    } else {
        StacksAddress::parse(p).is_ok()
    };
    if valid { Ok(()) } else { Err(EncodeError::InvalidPrincipal(p.to_string())) }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(body: &str, literal: &str) -> Result<String, EncodeError> {
    let invalid = || EncodeError::InvalidLiteral(literal.to_string());
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next().ok_or_else(invalid)? {
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                _ => return Err(invalid()),
            },
            // an unescaped quote would have terminated the literal
            '"' => return Err(invalid()),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// A literal argument tagged with its kind.
///
/// Serializes as the bare literal string, e.g. `"u100"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedArg {
    kind: ArgKind,
    literal: String,
}

impl EncodedArg {
    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Parses a literal back into its typed value.
    pub fn decode(literal: &str) -> Result<ClarityValue, EncodeError> {
        let invalid = || EncodeError::InvalidLiteral(literal.to_string());
        match literal {
            "true" => return Ok(ClarityValue::Bool(true)),
            "false" => return Ok(ClarityValue::Bool(false)),
            _ => {}
        }
        if let Some(rest) = literal.strip_prefix("u\"") {
            let body = rest.strip_suffix('"').ok_or_else(invalid)?;
            return Ok(ClarityValue::Utf8String(unescape(body, literal)?));
        }
        if let Some(rest) = literal.strip_prefix('"') {
            let body = rest.strip_suffix('"').ok_or_else(invalid)?;
            return Ok(ClarityValue::AsciiString(unescape(body, literal)?));
        }
        if let Some(principal) = literal.strip_prefix('\'') {
            return Ok(ClarityValue::Principal(principal.to_string()));
        }
        if let Some(digits) = literal.strip_prefix('u') {
            return parse_uint(digits).map(ClarityValue::Uint);
        }
        Err(invalid())
    }

    /// Parses and re-validates a literal, so that only canonical encodings are accepted.
    pub fn parse(literal: &str) -> Result<Self, EncodeError> {
        let encoded = Self::decode(literal)?.encode()?;
        if encoded.literal != literal {
            return Err(EncodeError::InvalidLiteral(literal.to_string()));
        }
        Ok(encoded)
    }
}

impl fmt::Display for EncodedArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl TryFrom<String> for EncodedArg {
    type Error = EncodeError;

    fn try_from(literal: String) -> Result<Self, Self::Error> {
        Self::parse(&literal)
    }
}

impl From<EncodedArg> for String {
    fn from(arg: EncodedArg) -> Self {
        arg.literal
    }
}

/// One positional parameter of a contract function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    /// Maximum byte length, for string kinds.
    pub max_len: Option<usize>,
}

impl ArgSpec {
    pub const fn new(name: &'static str, kind: ArgKind) -> Self {
        Self { name, kind, max_len: None }
    }

    pub const fn string(name: &'static str, kind: ArgKind, max_len: usize) -> Self {
        Self { name, kind, max_len: Some(max_len) }
    }

    /// Checks a decoded value against this parameter's kind and length bound.
    pub fn check(&self, value: &ClarityValue) -> Result<(), ArgMismatch> {
        if value.kind() != self.kind {
            return Err(ArgMismatch::Kind { name: self.name, expected: self.kind, got: value.kind() });
        }
        if let (Some(max), ClarityValue::AsciiString(s) | ClarityValue::Utf8String(s)) =
            (self.max_len, value)
            && s.len() > max
        {
            return Err(ArgMismatch::Encoding(EncodeError::StringTooLong { len: s.len(), max }));
        }
        Ok(())
    }
}

/// Reason an argument does not fit its parameter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArgMismatch {
    #[error("argument `{name}` must be {expected}, got {got}")]
    Kind { name: &'static str, expected: ArgKind, got: ArgKind },
    #[error(transparent)]
    Encoding(#[from] EncodeError),
}
