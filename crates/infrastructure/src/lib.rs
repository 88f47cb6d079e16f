//! Apicheck Infrastructure - Adapters and implementations
//!
//! This crate provides the concrete transport behind the
//! [`apicheck_application::ports::HttpClient`] port and the tracing setup
//! shared by every scenario run.

pub mod adapters;
pub mod http;
pub mod logging;

pub use adapters::ReqwestHttpClient;
pub use http::{BodyBuildError, apply_body};
pub use logging::{init_tracing, init_tracing_with};
