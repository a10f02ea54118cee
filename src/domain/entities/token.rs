//! Session bearer token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer token of the signed-in session, masked in all diagnostic output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AuthToken {
    value: String,
}

impl AuthToken {
    /// Creates a token, rejecting blank input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return None;
        }
        Some(Self { value })
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.value.chars().collect();
        if chars.len() <= 10 {
            return "*".repeat(chars.len());
        }

        let prefix: String = chars[..4].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{prefix}...{suffix}")
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "eyJhbGciOiJIUzI1NiJ9.payload.signature";

    #[test]
    fn test_blank_token_rejected() {
        assert!(AuthToken::new("   ").is_none());
    }

    #[test]
    fn test_token_masking() {
        let token = AuthToken::new(RAW).unwrap();
        let masked = token.masked();

        assert_eq!(masked, "eyJh...ture");
        assert!(!masked.contains(RAW));
    }

    #[test]
    fn test_short_token_fully_masked() {
        let token = AuthToken::new("abc").unwrap();
        assert_eq!(token.masked(), "***");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = AuthToken::new(RAW).unwrap();
        let debug_output = format!("{token:?}");

        assert!(!debug_output.contains(RAW));
    }
}
