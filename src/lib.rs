//! Aquifer: natural-language answer service for groundwater metrics.
//!
//! Answers free-text questions about water level, recharge, rainfall, and
//! exploitation by running a five-stage pipeline: normalize the query into
//! clean English, build SQL against a fixed four-table schema, execute it
//! read-only, explain the results, and format the answer back into the
//! user's original language and style.

pub mod api;
pub mod capability;
pub mod config;
pub mod db;
pub mod error;
pub mod pipeline;
pub mod query;

pub use api::{create_router, ApiState};
pub use capability::{
    ApiExplainer, ApiFormatter, ApiNormalizer, ApiSqlGenerator, ApiTextProvider, Explainer,
    Formatter, Normalizer, SqlGenerator,
};
pub use config::Config;
pub use db::{sanitize, Executor, PgExecutor};
pub use error::{AquiferError, CapabilityError, ConfigError, ExecutionError, Result};
pub use pipeline::Pipeline;
pub use query::{
    Cell, FinalAnswer, IntentKind, NormalizedQuery, QueryBuilder, ResultSet, StageOutcome,
};
