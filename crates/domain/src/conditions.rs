//! Constructors for the conditions scenarios chain onto responses.
//!
//! ```
//! use apicheck_domain::conditions::{has_message, has_status_code};
//! use apicheck_domain::response::ResponseSpec;
//!
//! let response = ResponseSpec::json(
//!     201,
//!     &serde_json::json!({"info": {"status": "success", "message": "User created"}}),
//! );
//! assert!(has_status_code(201).matches(&response));
//! assert!(has_message("User created").matches(&response));
//! ```

use regex::Regex;
use serde_json::Value;

use crate::condition::{ComparisonOperator, Condition, MessageSource, StatusExpectation};
use crate::error::{DomainError, DomainResult};

/// Status code equals `expected`.
#[must_use]
pub const fn has_status_code(expected: u16) -> Condition {
    Condition::StatusCode {
        expected: StatusExpectation::Exact(expected),
    }
}

/// Status code is within `min..=max`.
#[must_use]
pub const fn has_status_in(min: u16, max: u16) -> Condition {
    Condition::StatusCode {
        expected: StatusExpectation::Range { min, max },
    }
}

/// Body message equals `expected`, read from `info.message` or `message`.
#[must_use]
pub fn has_message(expected: impl Into<String>) -> Condition {
    message(MessageSource::Auto, expected)
}

/// Body `info.message` equals `expected`.
#[must_use]
pub fn has_info_message(expected: impl Into<String>) -> Condition {
    message(MessageSource::Info, expected)
}

/// Top-level body `message` equals `expected`.
#[must_use]
pub fn has_flat_message(expected: impl Into<String>) -> Condition {
    message(MessageSource::Flat, expected)
}

fn message(source: MessageSource, expected: impl Into<String>) -> Condition {
    Condition::Message {
        source,
        expected: expected.into(),
    }
}

/// JSON path is present and not null.
#[must_use]
pub fn has_json_path(path: impl Into<String>) -> Condition {
    Condition::JsonPath {
        path: path.into(),
        expected: None,
    }
}

/// JSON path holds `expected`.
#[must_use]
pub fn has_json_value(path: impl Into<String>, expected: impl Into<Value>) -> Condition {
    Condition::JsonPath {
        path: path.into(),
        expected: Some(expected.into()),
    }
}

/// String at JSON path matches `pattern`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidPattern`] if `pattern` does not compile.
pub fn matches_json_pattern(
    path: impl Into<String>,
    pattern: impl Into<String>,
) -> DomainResult<Condition> {
    let pattern = pattern.into();
    Regex::new(&pattern).map_err(|e| DomainError::InvalidPattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;
    Ok(Condition::JsonPathMatches {
        path: path.into(),
        pattern,
    })
}

/// Length of the value at JSON path compares to `length`.
#[must_use]
pub fn has_json_length(
    path: impl Into<String>,
    operator: ComparisonOperator,
    length: usize,
) -> Condition {
    Condition::JsonLength {
        path: path.into(),
        operator,
        length,
    }
}

/// Header is present, with `expected` value when given.
#[must_use]
pub fn has_header(name: impl Into<String>, expected: Option<&str>) -> Condition {
    Condition::HeaderEquals {
        name: name.into(),
        expected: expected.map(str::to_string),
    }
}

/// Raw body length compares to `length`.
#[must_use]
pub const fn has_body_length(operator: ComparisonOperator, length: usize) -> Condition {
    Condition::BodyLength { operator, length }
}
