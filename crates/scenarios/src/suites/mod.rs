//! Scenario suites.
//!
//! Every scenario is an independent async procedure over a [`Suite`]. It
//! issues its requests one at a time and stops at the first unmet
//! expectation, returning it as an error.
//!
//! [`Suite`]: crate::harness::Suite

pub mod files;
pub mod store;
pub mod users;

use std::fmt::Debug;

use apicheck_application::{ApplicationError, ApplicationResult, AssertableResponse};

const BODY_PREVIEW_CHARS: usize = 500;

/// Fails with a condition error unless `holds`.
///
/// For expectations that span several responses, which no single
/// [`apicheck_domain::Condition`] can express.
pub(crate) fn ensure(
    holds: bool,
    description: &str,
    actual: &impl Debug,
    response: &AssertableResponse,
) -> ApplicationResult<()> {
    if holds {
        return Ok(());
    }
    Err(ApplicationError::ConditionFailed {
        description: description.to_string(),
        actual: format!("{actual:?}"),
        message: format!("expected {description}, but was {actual:?}"),
        body: response.as_response().preview(BODY_PREVIEW_CHARS),
    })
}
