//! HTTP request handlers, grouped by resource.

pub mod catalog;
pub mod health;
pub mod marks;

pub use health::{health_check, readiness_check};
