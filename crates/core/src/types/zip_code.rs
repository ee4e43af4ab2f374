//! Brazilian postal code (CEP) value type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ZipCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ZipCodeError {
    /// The input contains no characters after normalization.
    #[error("zip code cannot be empty")]
    Empty,
    /// The input contains a character that is not a decimal digit.
    #[error("zip code must contain only digits")]
    InvalidCharacters,
    /// The normalized input does not have the required length.
    #[error("zip code must have exactly {expected} digits")]
    InvalidLength {
        /// Required number of digits.
        expected: usize,
    },
}

/// A Brazilian postal code (CEP).
///
/// Normalizes raw user input by stripping hyphens and spaces before
/// validation, so `"01001-000"` and `"01001 000"` both parse to the
/// same value as `"01001000"`.
///
/// ## Constraints
///
/// - Exactly 8 decimal digits after normalization
/// - No characters other than digits, `-`, and space in the input
///
/// ## Examples
///
/// ```
/// use cep_clima_core::ZipCode;
///
/// // Valid forms
/// assert!(ZipCode::parse("01001000").is_ok());
/// assert!(ZipCode::parse("01001-000").is_ok());
/// assert!(ZipCode::parse("01001 000").is_ok());
///
/// // Invalid forms
/// assert!(ZipCode::parse("").is_err());         // empty
/// assert!(ZipCode::parse("1234567").is_err());  // too short
/// assert!(ZipCode::parse("01306ABC").is_err()); // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    /// Number of digits in a normalized zip code.
    pub const LENGTH: usize = 8;

    /// Parse a `ZipCode` from raw input, normalizing first.
    ///
    /// # Errors
    ///
    /// Returns an error if, after stripping `-` and space characters,
    /// the input:
    /// - Is empty
    /// - Contains a non-digit character
    /// - Does not have exactly 8 digits
    pub fn parse(s: &str) -> Result<Self, ZipCodeError> {
        let normalized: String = s.chars().filter(|c| *c != '-' && *c != ' ').collect();

        if normalized.is_empty() {
            return Err(ZipCodeError::Empty);
        }

        if !normalized.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ZipCodeError::InvalidCharacters);
        }

        if normalized.len() != Self::LENGTH {
            return Err(ZipCodeError::InvalidLength {
                expected: Self::LENGTH,
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized zip code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ZipCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ZipCode {
    type Err = ZipCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_digits() {
        let zip = ZipCode::parse("01001000").unwrap();
        assert_eq!(zip.as_str(), "01001000");
    }

    #[test]
    fn test_parse_strips_hyphen() {
        let zip = ZipCode::parse("01001-000").unwrap();
        assert_eq!(zip.as_str(), "01001000");
    }

    #[test]
    fn test_parse_strips_spaces() {
        let zip = ZipCode::parse("01001 000").unwrap();
        assert_eq!(zip.as_str(), "01001000");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(ZipCode::parse(""), Err(ZipCodeError::Empty)));
    }

    #[test]
    fn test_parse_only_separators() {
        // Nothing remains once the separators are stripped
        assert!(matches!(ZipCode::parse("- -"), Err(ZipCodeError::Empty)));
    }

    #[test]
    fn test_parse_non_digit() {
        assert!(matches!(
            ZipCode::parse("01306ABC"),
            Err(ZipCodeError::InvalidCharacters)
        ));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            ZipCode::parse("1234567"),
            Err(ZipCodeError::InvalidLength { expected: 8 })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            ZipCode::parse("123456789"),
            Err(ZipCodeError::InvalidLength { expected: 8 })
        ));
    }

    #[test]
    fn test_value_equality() {
        let a = ZipCode::parse("01001-000").unwrap();
        let b = ZipCode::parse("01001000").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let zip = ZipCode::parse("01001-000").unwrap();
        assert_eq!(format!("{zip}"), "01001000");
    }

    #[test]
    fn test_from_str() {
        let zip: ZipCode = "04538-133".parse().unwrap();
        assert_eq!(zip.as_str(), "04538133");
    }

    #[test]
    fn test_serde_roundtrip() {
        let zip = ZipCode::parse("01001000").unwrap();
        let json = serde_json::to_string(&zip).unwrap();
        assert_eq!(json, "\"01001000\"");

        let parsed: ZipCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, zip);
    }
}
