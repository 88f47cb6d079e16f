//! Fluent assertions over one HTTP response.

use std::any::type_name;
use std::borrow::Borrow;

use apicheck_domain::condition::json_path;
use apicheck_domain::{Condition, ConditionResult, ResponseSpec, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApplicationError, ApplicationResult};

const BODY_PREVIEW_CHARS: usize = 500;

/// Wraps exactly one response and checks conditions against it.
///
/// Checks never mutate the response, so any number of them can be chained:
///
/// ```
/// use apicheck_application::AssertableResponse;
/// use apicheck_domain::{ResponseSpec, conditions::{has_message, has_status_code}};
/// use serde_json::json;
///
/// # fn main() -> apicheck_application::ApplicationResult<()> {
/// let response = AssertableResponse::new(ResponseSpec::json(
///     201,
///     &json!({"info": {"status": "success", "message": "User created"}}),
/// ));
/// response
///     .should(has_status_code(201))?
///     .should(has_message("User created"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertableResponse {
    response: ResponseSpec,
}

impl AssertableResponse {
    /// Wraps a response.
    #[must_use]
    pub const fn new(response: ResponseSpec) -> Self {
        Self { response }
    }

    /// Evaluates `condition` and fails when it does not hold.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::ConditionFailed`] with the condition's
    /// description, the observed value and a preview of the body.
    pub fn should(&self, condition: impl Borrow<Condition>) -> ApplicationResult<&Self> {
        let result = self.check(condition);
        if result.passed {
            tracing::debug!(condition = %result.condition.describe(), "condition passed");
            return Ok(self);
        }

        tracing::debug!(
            condition = %result.condition.describe(),
            actual = %result.actual,
            "condition failed"
        );
        Err(ApplicationError::ConditionFailed {
            description: result.condition.describe(),
            message: result.failure_message(),
            actual: result.actual,
            body: self.preview(),
        })
    }

    /// Evaluates `condition` without failing.
    #[must_use]
    pub fn check(&self, condition: impl Borrow<Condition>) -> ConditionResult {
        condition.borrow().evaluate(&self.response)
    }

    /// The response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.response.status_code()
    }

    /// Deserializes the whole body.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Deserialize`] when the body does not have
    /// the shape of `T`.
    pub fn as_type<T: DeserializeOwned>(&self) -> ApplicationResult<T> {
        serde_json::from_slice(&self.response.body).map_err(|source| self.deserialize_error::<T>(source))
    }

    /// Deserializes a body holding a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Deserialize`] when the body is not an
    /// array of `T`.
    pub fn as_list<T: DeserializeOwned>(&self) -> ApplicationResult<Vec<T>> {
        self.as_type()
    }

    /// Deserializes the value at a JSON path, e.g. `info` or `items[0]`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingField`] when the path is absent and
    /// [`ApplicationError::Deserialize`] when its value has the wrong shape.
    pub fn extract<T: DeserializeOwned>(&self, path: &str) -> ApplicationResult<T> {
        let json: Value = self.as_type()?;
        let value = json_path::query(&json, path)?.ok_or_else(|| ApplicationError::MissingField {
            field: path.to_string(),
            body: self.preview(),
        })?;
        T::deserialize(value).map_err(|source| self.deserialize_error::<T>(source))
    }

    /// Returns the `token` field of the body.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingField`] when the body has no
    /// string `token`.
    pub fn as_jwt(&self) -> ApplicationResult<String> {
        let json: Value = self.as_type()?;
        json.get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ApplicationError::MissingField {
                field: "token".to_string(),
                body: self.preview(),
            })
    }

    /// Raw access to the wrapped response.
    #[must_use]
    pub const fn as_response(&self) -> &ResponseSpec {
        &self.response
    }

    /// Raw body bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.response.body
    }

    /// Unwraps the response.
    #[must_use]
    pub fn into_response(self) -> ResponseSpec {
        self.response
    }

    fn preview(&self) -> String {
        self.response.preview(BODY_PREVIEW_CHARS)
    }

    fn deserialize_error<T>(&self, source: serde_json::Error) -> ApplicationError {
        ApplicationError::Deserialize {
            target: type_name::<T>(),
            source,
            body: self.preview(),
        }
    }
}

impl From<ResponseSpec> for AssertableResponse {
    fn from(response: ResponseSpec) -> Self {
        Self::new(response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use apicheck_domain::conditions::{has_json_value, has_message, has_status_code};
    use apicheck_domain::models::{FullUser, Info, TokenResponse};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn created() -> AssertableResponse {
        AssertableResponse::new(ResponseSpec::json(
            201,
            &json!({"info": {"status": "success", "message": "User created"}}),
        ))
    }

    #[test]
    fn test_chained_conditions_pass() {
        let response = created();
        let chained = response
            .should(has_status_code(201))
            .and_then(|r| r.should(has_message("User created")))
            .unwrap();
        assert_eq!(chained, &response);
    }

    #[test]
    fn test_should_is_repeatable() {
        let response = created();
        let condition = has_status_code(200);
        let first = response.should(&condition).is_ok();
        let second = response.should(&condition).is_ok();
        assert_eq!(first, second);
        assert!(!first);
    }

    #[test]
    fn test_failure_carries_expected_actual_and_body() {
        let err = created().should(has_status_code(200)).unwrap_err();
        match err {
            ApplicationError::ConditionFailed {
                description,
                actual,
                message,
                body,
            } => {
                assert_eq!(description, "status code 200");
                assert_eq!(actual, "201 Created");
                assert!(message.contains("200") && message.contains("201"));
                assert!(body.contains("User created"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extract_nested_info() {
        let info: Info = created().extract("info").unwrap();
        assert_eq!(info, Info::new("success", "User created"));
    }

    #[test]
    fn test_extract_missing_path() {
        let err = created().extract::<Info>("data").unwrap_err();
        assert!(matches!(err, ApplicationError::MissingField { ref field, .. } if field == "data"));
    }

    #[test]
    fn test_as_type_and_list() {
        let single = AssertableResponse::new(ResponseSpec::json(
            200,
            &json!({"id": 7, "login": "aisen42", "pass": "secret"}),
        ));
        let user: FullUser = single.as_type().unwrap();
        assert_eq!(user.login, "aisen42");

        let list = AssertableResponse::new(ResponseSpec::json(200, &json!(["admin", "demo"])));
        let logins: Vec<String> = list.as_list().unwrap();
        assert_eq!(logins, vec!["admin", "demo"]);
    }

    #[test]
    fn test_deserialize_error_names_target() {
        let response =
            AssertableResponse::new(ResponseSpec::new(200, HashMap::new(), b"<html>".to_vec(), Duration::ZERO));
        let err = response.as_type::<TokenResponse>().unwrap_err();
        match err {
            ApplicationError::Deserialize { target, body, .. } => {
                assert!(target.ends_with("TokenResponse"));
                assert_eq!(body, "<html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_as_jwt() {
        let ok = AssertableResponse::new(ResponseSpec::json(200, &json!({"token": "abc.def.ghi"})));
        assert_eq!(ok.as_jwt().unwrap(), "abc.def.ghi");
        ok.should(has_json_value("token", "abc.def.ghi")).unwrap();

        let missing = AssertableResponse::new(ResponseSpec::json(200, &json!({"jwt": "x"})));
        assert!(matches!(
            missing.as_jwt().unwrap_err(),
            ApplicationError::MissingField { ref field, .. } if field == "token"
        ));
    }

    #[test]
    fn test_as_response_is_idempotent() {
        let response = created();
        let first = response.as_response().clone();
        let second = response.as_response().clone();
        assert_eq!(first, second);
        assert_eq!(response.as_bytes(), first.body.as_slice());
        assert_eq!(response.into_response(), first);
    }
}
