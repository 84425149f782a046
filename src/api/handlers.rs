//! HTTP request handlers.
//!
//! Domain-anticipated failures (no data, generation failure, store
//! rejection) are HTTP 200 with the `message` field populated; only
//! transport-level or unexpected faults surface as 500 {detail}.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::capability::{Formatter, Normalizer};
use crate::db::{sanitize, Executor};
use crate::pipeline::Pipeline;
use crate::query::{QueryBuilder, ResultSet};

/// Application state shared across handlers.
pub struct ApiState {
    pub pipeline: Arc<Pipeline>,
    pub normalizer: Arc<dyn Normalizer>,
    pub formatter: Arc<dyn Formatter>,
    pub builder: QueryBuilder,
    pub executor: Arc<dyn Executor>,
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeResponse {
    pub normalized_english: String,
    pub original_language_code: String,
    pub style: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormatBackRequest {
    pub answer_english: String,
    pub style: String,
    #[serde(default = "default_language_code")]
    pub original_language_code: String,
}

fn default_language_code() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct FormatBackResponse {
    pub final_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToSqlRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToSqlResponse {
    pub user_query: String,
    pub generated_sql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_result: Option<ResultSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineRequest {
    pub text: String,
}

/// Error response for transport-level failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

// ============================================================================
// Handler Functions
// ============================================================================

/// GET / - liveness check.
pub async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Groundwater answer service is running"
    }))
}

/// POST /nlp/normalize - normalize a query into clean English.
pub async fn normalize_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<NormalizeRequest>,
) -> impl IntoResponse {
    match state.normalizer.normalize(&request.text).await {
        Ok(normalized) => (
            StatusCode::OK,
            Json(NormalizeResponse {
                normalized_english: normalized.english_text,
                original_language_code: normalized.language_code,
                style: normalized.style,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDetail {
                detail: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /nlp/format-answer - adapt an English answer to the user's style.
pub async fn format_answer_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<FormatBackRequest>,
) -> impl IntoResponse {
    match state
        .formatter
        .format(
            &request.answer_english,
            &request.style,
            &request.original_language_code,
        )
        .await
    {
        Ok(final_text) => (StatusCode::OK, Json(FormatBackResponse { final_text })).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDetail {
                detail: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /nlp/to-sql - build and execute SQL for a query, returning both.
pub async fn to_sql_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ToSqlRequest>,
) -> Json<ToSqlResponse> {
    let Some(sql) = state.builder.build(&request.query).await else {
        return Json(ToSqlResponse {
            user_query: request.query,
            generated_sql: String::new(),
            db_result: None,
            message: Some("data not found".to_string()),
        });
    };

    match state.executor.execute(&sql).await {
        Ok(results) => {
            let results = sanitize(results);
            let message = results
                .is_empty()
                .then(|| "data not found".to_string());
            Json(ToSqlResponse {
                user_query: request.query,
                generated_sql: sql,
                db_result: Some(results),
                message,
            })
        }
        Err(e) => {
            tracing::error!("SQL execution failed: {}", e);
            Json(ToSqlResponse {
                user_query: request.query,
                generated_sql: sql,
                db_result: None,
                message: Some("database query failed".to_string()),
            })
        }
    }
}

/// POST /nlp/pipeline - run the full answer pipeline.
///
/// Always 200: the pipeline absorbs every domain-anticipated failure into a
/// well-formed answer.
pub async fn pipeline_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<PipelineRequest>,
) -> impl IntoResponse {
    Json(state.pipeline.run(&request.text).await)
}
