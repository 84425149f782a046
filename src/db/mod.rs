//! Relational store access.

pub mod executor;
pub mod sanitize;

pub use executor::{Executor, PgExecutor};
pub use sanitize::sanitize;
