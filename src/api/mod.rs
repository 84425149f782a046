//! HTTP API.

pub mod handlers;
pub mod rest;

pub use handlers::ApiState;
pub use rest::create_router;
