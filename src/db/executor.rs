//! Read-only SQL execution against the relational store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Row, TypeInfo};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::{ExecutionError, Result};
use crate::query::{Cell, ResultSet};

/// Executes a structured query and returns columns plus rows exactly as the
/// store produced them. Implementations never mutate the store and never
/// reinterpret results.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, sql: &str) -> std::result::Result<ResultSet, ExecutionError>;
}

/// Postgres-backed executor. Each call checks a connection out of the pool
/// and returns it on every exit path.
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config.resolve_url()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&url)
            .await
            .map_err(ExecutionError::Connection)?;
        Ok(Self::new(pool))
    }

    /// Startup connectivity probe.
    pub async fn probe(&self) -> std::result::Result<(), ExecutionError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(ExecutionError::Connection)?;
        Ok(())
    }
}

#[async_trait]
impl Executor for PgExecutor {
    async fn execute(&self, sql: &str) -> std::result::Result<ResultSet, ExecutionError> {
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(ExecutionError::Query)?;

        let columns = rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let rows = rows
            .iter()
            .map(|row| (0..row.columns().len()).map(|i| decode_cell(row, i)).collect())
            .collect();

        Ok(ResultSet { columns, rows })
    }
}

/// Decode one cell by its Postgres type. NUMERIC stays arbitrary-precision
/// here; the sanitizer converts it downstream. Values of types outside the
/// closed set are carried as text.
fn decode_cell(row: &PgRow, idx: usize) -> Cell {
    let type_name = row.columns()[idx].type_info().name();
    let cell = match type_name {
        "BOOL" => row
            .try_get::<Option<bool>, _>(idx)
            .map(|v| v.map(Cell::Bool)),
        "INT2" => row
            .try_get::<Option<i16>, _>(idx)
            .map(|v| v.map(|n| Cell::Int(n.into()))),
        "INT4" => row
            .try_get::<Option<i32>, _>(idx)
            .map(|v| v.map(|n| Cell::Int(n.into()))),
        "INT8" => row
            .try_get::<Option<i64>, _>(idx)
            .map(|v| v.map(Cell::Int)),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(idx)
            .map(|v| v.map(|n| Cell::Float(n.into()))),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(idx)
            .map(|v| v.map(Cell::Float)),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(idx)
            .map(|v| v.map(Cell::Decimal)),
        _ => row
            .try_get::<Option<String>, _>(idx)
            .map(|v| v.map(Cell::Text)),
    };

    cell.ok().flatten().unwrap_or(Cell::Null)
}
