//! Apicheck Scenarios - Suites against the services under test
//!
//! The suites in [`suites`] run against whatever a [`harness::Suite`] points
//! at: in-process stubs by default, the remote services for the ignored live
//! tests.

pub mod fixtures;
pub mod harness;
pub mod stub;
pub mod suites;

pub use harness::{HarnessError, StubbedSuite, Suite};
