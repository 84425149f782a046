//! Stub capabilities and executor for pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use aquifer::{
    CapabilityError, ExecutionError, Executor, Explainer, Formatter, NormalizedQuery, Normalizer,
    ResultSet, SqlGenerator,
};

/// Returns a canned normalization, or fails when `None`.
pub struct StubNormalizer(pub Option<NormalizedQuery>);

#[async_trait]
impl Normalizer for StubNormalizer {
    async fn normalize(&self, _text: &str) -> Result<NormalizedQuery, CapabilityError> {
        self.0
            .clone()
            .ok_or_else(|| CapabilityError::Api("normalizer unavailable".to_string()))
    }
}

/// Returns canned SQL, or fails when `None`.
pub struct StubGenerator(pub Option<String>);

#[async_trait]
impl SqlGenerator for StubGenerator {
    async fn generate(&self, _query: &str) -> Result<String, CapabilityError> {
        self.0
            .clone()
            .ok_or_else(|| CapabilityError::Api("generator unavailable".to_string()))
    }
}

/// Records every executed statement and returns a canned result set, or an
/// execution error when constructed with `Err(())`.
pub struct RecordingExecutor {
    pub response: Result<ResultSet, ()>,
    pub calls: AtomicUsize,
    pub last_sql: Mutex<Option<String>>,
}

impl RecordingExecutor {
    pub fn new(response: Result<ResultSet, ()>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_sql: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_sql(&self) -> Option<String> {
        self.last_sql.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn execute(&self, sql: &str) -> Result<ResultSet, ExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_sql.lock().unwrap() = Some(sql.to_string());
        match &self.response {
            Ok(results) => Ok(results.clone()),
            Err(()) => Err(ExecutionError::Query(sqlx::Error::RowNotFound)),
        }
    }
}

/// Counts invocations and returns a canned explanation, or fails when
/// `None`.
pub struct StubExplainer {
    pub response: Option<String>,
    pub calls: AtomicUsize,
}

impl StubExplainer {
    pub fn new(response: Option<&str>) -> Self {
        Self {
            response: response.map(str::to_string),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Explainer for StubExplainer {
    async fn explain(&self, _query: &str, _results: &ResultSet) -> Result<String, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .ok_or_else(|| CapabilityError::Api("explainer unavailable".to_string()))
    }
}

/// Returns a canned formatted answer, or fails when `None`.
pub struct StubFormatter(pub Option<String>);

#[async_trait]
impl Formatter for StubFormatter {
    async fn format(
        &self,
        _answer: &str,
        _style: &str,
        _language_code: &str,
    ) -> Result<String, CapabilityError> {
        self.0
            .clone()
            .ok_or_else(|| CapabilityError::Api("formatter unavailable".to_string()))
    }
}
