//! Expectation values carried by conditions.

use std::fmt;

use serde_json::Value;

use crate::response::ResponseSpec;

/// Expected status code value or range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Inclusive range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of several status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code satisfies this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Any 2xx status.
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }
}

impl fmt::Display for StatusExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{code}"),
            Self::Range { min, max } => write!(f, "in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes: Vec<_> = codes.iter().map(ToString::to_string).collect();
                write!(f, "in [{}]", codes.join(", "))
            }
        }
    }
}

/// Comparison operators for length conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
}

impl ComparisonOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
        }
    }

    /// Applies the operator as `actual <op> expected`.
    #[must_use]
    pub const fn compare(self, actual: usize, expected: usize) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::NotEquals => actual != expected,
            Self::GreaterThan => actual > expected,
            Self::GreaterThanOrEqual => actual >= expected,
            Self::LessThan => actual < expected,
            Self::LessThanOrEqual => actual <= expected,
        }
    }
}

/// Where a service puts the human-readable message of a response.
///
/// The user service wraps it as `{"info": {"status", "message"}}`, other
/// services return a top-level `message` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageSource {
    /// Nested `info.message`.
    Info,
    /// Top-level `message`.
    Flat,
    /// `info.message` when present, otherwise `message`.
    #[default]
    Auto,
}

impl MessageSource {
    /// Extracts the message from a parsed body.
    #[must_use]
    pub fn extract(self, body: &Value) -> Option<&str> {
        let info = || body.pointer("/info/message").and_then(Value::as_str);
        let flat = || body.get("message").and_then(Value::as_str);
        match self {
            Self::Info => info(),
            Self::Flat => flat(),
            Self::Auto => info().or_else(flat),
        }
    }

    /// Extracts the message from a response body, if the body is JSON.
    #[must_use]
    pub fn extract_from(self, response: &ResponseSpec) -> Option<String> {
        let body = response.body_json().ok()?;
        self.extract(&body).map(str::to_string)
    }

    /// Field name used in descriptions.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Info => "info.message",
            Self::Flat | Self::Auto => "message",
        }
    }
}
