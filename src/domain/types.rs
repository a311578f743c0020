//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (normalized email, E.164 phone,
//! canonical MAC address) so that once a value reaches the domain layer it can
//! be treated as trusted.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

use phonenumber::{Mode, parse};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("value cannot be empty")]
    EmptyString,
    #[error("invalid phone number")]
    InvalidPhone,
    #[error("invalid MAC address, expected format 00:1A:79:B2:5A:58")]
    InvalidMacAddress,
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        Ok(Self(normalize_email(email)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Ok(Self(normalize_phone_to_e164(&value.into())?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn mac_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$").expect("valid MAC regex")
    })
}

/// Validated MAC address, stored in canonical upper-case colon form
/// (`00:1A:79:B2:5A:58`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.into().trim().to_string();
        if !mac_regex().is_match(&raw) {
            return Err(TypeConstraintError::InvalidMacAddress);
        }
        Ok(Self(raw.to_uppercase().replace('-', ":")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical form with `-` separators, as some portals render it.
    pub fn dashed(&self) -> String {
        self.0.replace(':', "-")
    }

    /// Returns true when the given text contains this MAC address in either
    /// colon or dash notation, ignoring case.
    pub fn matches_text(&self, text: &str) -> bool {
        let haystack = text.to_uppercase();
        haystack.contains(self.0.as_str()) || haystack.contains(&self.dashed())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for MacAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MacAddress> for String {
    fn from(value: MacAddress) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        let email = Email::new("  John.Doe@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "john.doe@example.com");
    }

    #[test]
    fn invalid_email_is_rejected() {
        assert_eq!(
            Email::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn non_empty_string_rejects_whitespace() {
        assert!(NonEmptyString::new("   ").is_err());
        assert_eq!(NonEmptyString::new(" x ").unwrap().as_str(), "x");
    }

    #[test]
    fn mac_address_canonical_form() {
        let mac = MacAddress::new("00-1a-79-b2-5a-58").unwrap();
        assert_eq!(mac.as_str(), "00:1A:79:B2:5A:58");
        assert_eq!(mac.dashed(), "00-1A-79-B2-5A-58");
    }

    #[test]
    fn mac_address_rejects_garbage() {
        assert!(MacAddress::new("00:1A:79:B2:5A").is_err());
        assert!(MacAddress::new("zz:zz:zz:zz:zz:zz").is_err());
        assert!(MacAddress::new("").is_err());
    }

    #[test]
    fn mac_matches_either_notation() {
        let mac = MacAddress::new("00:1A:79:B2:5A:58").unwrap();
        assert!(mac.matches_text("<td>00:1a:79:b2:5a:58</td>"));
        assert!(mac.matches_text("device 00-1A-79-B2-5A-58 active"));
        assert!(!mac.matches_text("00:1A:79:B2:5A:59"));
    }
}
