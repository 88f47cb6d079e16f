//! Apicheck Application - Assertions, service facades and configuration
//!
//! This crate sits between the domain model and the transport. It defines the
//! [`ports::HttpClient`] port, wraps responses in [`AssertableResponse`] and
//! exposes one facade per service under test.

pub mod assertable;
pub mod config;
pub mod error;
pub mod ports;
pub mod services;

pub use assertable::AssertableResponse;
pub use config::{ConfigError, ExchangeLogging, ServiceConfig, SuiteConfig};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError};
pub use services::{FileService, SortOrder, StoreService, UserService, send};
