//! HTTP request building helpers.

pub mod body_builder;

pub use body_builder::{BodyBuildError, apply_body, build_form, part_mime};
