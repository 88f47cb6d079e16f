//! Apicheck Domain - Core types
//!
//! This crate defines the domain model of the apicheck toolkit: request and
//! response specifications, response conditions and the value objects of
//! the services under test. All types here are pure Rust with no I/O.

pub mod condition;
pub mod conditions;
pub mod error;
pub mod models;
pub mod request;
pub mod response;

pub use condition::{
    ComparisonOperator, Condition, ConditionResult, MessageSource, StatusExpectation,
};
pub use error::{DomainError, DomainResult};
pub use request::{FilePart, Header, HttpMethod, QueryParam, RequestBody, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
