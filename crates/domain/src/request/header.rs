//! Request header and query parameter pairs

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A single HTTP header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The header name (e.g., "Accept").
    pub name: String,
    /// The header value.
    pub value: String,
}

impl Header {
    /// Creates a header after checking the name is a valid token.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidHeaderName`] for empty names or names
    /// containing separators, whitespace or control characters.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() || !name.bytes().all(is_token_byte) {
            return Err(DomainError::InvalidHeaderName(name));
        }
        Ok(Self {
            name,
            value: value.into(),
        })
    }

    /// Returns true when this header has the given name (case-insensitive).
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

// RFC 9110 token characters.
const fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
                | b'`' | b'|' | b'~'
        )
}

/// A query parameter appended to the request URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// Parameter key.
    pub key: String,
    /// Parameter value.
    pub value: String,
}

impl QueryParam {
    /// Creates a query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_header_name_validation() {
        assert!(Header::new("Content-Type", "application/json").is_ok());
        assert!(Header::new("", "x").is_err());
        assert!(Header::new("Bad Header", "x").is_err());
        assert!(Header::new("Bad:Header", "x").is_err());
    }

    #[test]
    fn test_header_is_case_insensitive() {
        let header = Header::new("Authorization", "Bearer abc").unwrap();
        assert!(header.is("authorization"));
        assert!(!header.is("accept"));
    }
}
