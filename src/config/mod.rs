//! Configuration for the aquifer service.

mod settings;

pub use settings::{Config, DatabaseConfig, LlmConfig, ServerConfig};
