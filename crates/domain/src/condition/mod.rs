//! Response conditions.
//!
//! A [`Condition`] is an immutable predicate over one [`ResponseSpec`]. It can
//! describe itself for failure messages and report the value it observed, so
//! a failed check always shows expected and actual side by side.

mod expectation;
pub mod json_path;

pub use expectation::{ComparisonOperator, MessageSource, StatusExpectation};

use regex::Regex;
use serde_json::Value;

use crate::response::ResponseSpec;

/// A check evaluated against a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Status code equals or falls in the expectation.
    StatusCode {
        /// Expected status code or range.
        expected: StatusExpectation,
    },
    /// The body message equals `expected`.
    Message {
        /// Where the message lives in the body.
        source: MessageSource,
        /// Expected message text.
        expected: String,
    },
    /// A JSON path exists with a non-null value, optionally equal to `expected`.
    JsonPath {
        /// Path expression (e.g., `address.zipcode`).
        path: String,
        /// Expected value; `None` only checks presence.
        expected: Option<Value>,
    },
    /// A string at a JSON path matches a regex.
    JsonPathMatches {
        /// Path expression.
        path: String,
        /// Regex pattern, checked when the condition is built.
        pattern: String,
    },
    /// Length of the array, object or string at a JSON path.
    JsonLength {
        /// Path expression; empty for the root.
        path: String,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Length to compare against.
        length: usize,
    },
    /// A header is present and optionally has a value.
    HeaderEquals {
        /// Header name (case-insensitive).
        name: String,
        /// Expected value; `None` only checks presence.
        expected: Option<String>,
    },
    /// Raw body length in bytes.
    BodyLength {
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Length to compare against.
        length: usize,
    },
}

impl Condition {
    /// Human-readable description used in failure messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("status code {expected}"),
            Self::Message { source, expected } => {
                format!("{} is '{expected}'", source.field())
            }
            Self::JsonPath {
                path,
                expected: Some(value),
            } => format!("JSON '{path}' equals {value}"),
            Self::JsonPath {
                path,
                expected: None,
            } => format!("JSON '{path}' is present"),
            Self::JsonPathMatches { path, pattern } => {
                format!("JSON '{path}' matches /{pattern}/")
            }
            Self::JsonLength {
                path,
                operator,
                length,
            } => format!("JSON '{path}' length {} {length}", operator.symbol()),
            Self::HeaderEquals {
                name,
                expected: Some(value),
            } => format!("header '{name}' equals '{value}'"),
            Self::HeaderEquals {
                name,
                expected: None,
            } => format!("header '{name}' is present"),
            Self::BodyLength { operator, length } => {
                format!("body length {} {length}", operator.symbol())
            }
        }
    }

    /// Returns true when the response satisfies this condition.
    #[must_use]
    pub fn matches(&self, response: &ResponseSpec) -> bool {
        self.evaluate(response).passed
    }

    /// Evaluates the condition, capturing the observed value.
    #[must_use]
    pub fn evaluate(&self, response: &ResponseSpec) -> ConditionResult {
        match self {
            Self::StatusCode { expected } => {
                let actual = response.status_code();
                self.verdict(expected.matches(actual.as_u16()), actual.to_string())
            }
            Self::Message { source, expected } => match source.extract_from(response) {
                Some(message) => self.verdict(message == *expected, format!("'{message}'")),
                None => self.missing(format!("no {} in body", source.field()), response),
            },
            Self::JsonPath { path, expected } => self.with_json_value(response, path, |value| {
                let passed = !value.is_null() && expected.as_ref().is_none_or(|e| e == value);
                (passed, value.to_string())
            }),
            Self::JsonPathMatches { path, pattern } => {
                let regex = match Regex::new(pattern) {
                    Ok(regex) => regex,
                    Err(e) => return self.missing(format!("invalid pattern: {e}"), response),
                };
                self.with_json_value(response, path, |value| match value.as_str() {
                    Some(text) => (regex.is_match(text), format!("'{text}'")),
                    None => (false, value.to_string()),
                })
            }
            Self::JsonLength {
                path,
                operator,
                length,
            } => self.with_json_value(response, path, |value| match json_len(value) {
                Some(actual) => (operator.compare(actual, *length), format!("length {actual}")),
                None => (false, format!("{value} has no length")),
            }),
            Self::HeaderEquals { name, expected } => match response.get_header(name) {
                Some(actual) => self.verdict(
                    expected.as_deref().is_none_or(|e| e == actual),
                    format!("'{actual}'"),
                ),
                None => self.missing(format!("header '{name}' not found"), response),
            },
            Self::BodyLength { operator, length } => {
                let actual = response.size();
                self.verdict(operator.compare(actual, *length), format!("{actual} bytes"))
            }
        }
    }

    fn verdict(&self, passed: bool, actual: String) -> ConditionResult {
        ConditionResult {
            condition: self.clone(),
            passed,
            actual,
            error: None,
        }
    }

    fn missing(&self, error: String, response: &ResponseSpec) -> ConditionResult {
        ConditionResult {
            condition: self.clone(),
            passed: false,
            actual: response.preview(200),
            error: Some(error),
        }
    }

    fn with_json_value(
        &self,
        response: &ResponseSpec,
        path: &str,
        check: impl FnOnce(&Value) -> (bool, String),
    ) -> ConditionResult {
        let json = match response.body_json() {
            Ok(json) => json,
            Err(e) => return self.missing(format!("body is not JSON: {e}"), response),
        };
        match json_path::query(&json, path) {
            Ok(Some(value)) => {
                let (passed, actual) = check(value);
                self.verdict(passed, actual)
            }
            Ok(None) => self.missing(format!("JSON path '{path}' not found"), response),
            Err(e) => self.missing(e.to_string(), response),
        }
    }
}

fn json_len(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(fields) => Some(fields.len()),
        Value::String(text) => Some(text.chars().count()),
        _ => None,
    }
}

/// Outcome of evaluating one condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionResult {
    /// The condition that was evaluated.
    pub condition: Condition,
    /// Whether it held.
    pub passed: bool,
    /// The observed value (or a body preview when nothing could be observed).
    pub actual: String,
    /// Why the value could not be observed, if that was the problem.
    pub error: Option<String>,
}

impl ConditionResult {
    /// Failure text: what was expected and what was seen.
    #[must_use]
    pub fn failure_message(&self) -> String {
        match &self.error {
            Some(error) => format!(
                "expected {}, but {error}; actual: {}",
                self.condition.describe(),
                self.actual
            ),
            None => format!(
                "expected {}, but was {}",
                self.condition.describe(),
                self.actual
            ),
        }
    }
}
