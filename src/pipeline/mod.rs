//! The five-stage answer pipeline.
//!
//! normalize -> build SQL -> execute -> explain -> format
//!
//! Each stage resolves to a [`StageOutcome`]: success, a degraded fallback
//! the pipeline continues with, or an abort that becomes the terminal
//! user-facing message. No stage error ever crosses the pipeline boundary,
//! and every exit path returns a well-formed [`FinalAnswer`].
//!
//! A pipeline instance holds no per-request state; all intermediates live on
//! the stack of one `run` call, so instances are freely shared across
//! concurrent requests.

use std::sync::Arc;

use crate::capability::{Explainer, Formatter, Normalizer};
use crate::db::{sanitize, Executor};
use crate::query::{FinalAnswer, NormalizedQuery, QueryBuilder, ResultSet, StageOutcome};

/// Fixed fallback text when explanation generation fails.
const EXPLANATION_APOLOGY: &str = "Sorry, couldn't generate explanation.";

/// Sequences the answer stages for one request.
pub struct Pipeline {
    normalizer: Arc<dyn Normalizer>,
    builder: QueryBuilder,
    executor: Arc<dyn Executor>,
    explainer: Arc<dyn Explainer>,
    formatter: Arc<dyn Formatter>,
}

impl Pipeline {
    pub fn new(
        normalizer: Arc<dyn Normalizer>,
        builder: QueryBuilder,
        executor: Arc<dyn Executor>,
        explainer: Arc<dyn Explainer>,
        formatter: Arc<dyn Formatter>,
    ) -> Self {
        Self {
            normalizer,
            builder,
            executor,
            explainer,
            formatter,
        }
    }

    /// Run the full pipeline for one raw user query.
    pub async fn run(&self, raw: &str) -> FinalAnswer {
        // Stage 1: normalize. Capability failure degrades to the raw text.
        let normalized = match self.normalize_stage(raw).await {
            StageOutcome::Ok(n) | StageOutcome::Degraded(n) => n,
            StageOutcome::Abort(message) => return FinalAnswer::failed(message),
        };
        tracing::debug!(
            english = %normalized.english_text,
            style = %normalized.style,
            intent = ?normalized.intent,
            "query normalized"
        );

        // Stage 2: build SQL. Without a query there is nothing to execute.
        let sql = match self.builder.build(&normalized.english_text).await {
            Some(sql) => sql,
            None => {
                tracing::warn!("No SQL produced for '{}'", normalized.english_text);
                return FinalAnswer::not_found(None);
            }
        };
        tracing::debug!(%sql, "structured query built");

        // Stage 3: execute and sanitize.
        let results = match self.execute_stage(&sql).await {
            StageOutcome::Ok(r) | StageOutcome::Degraded(r) => r,
            StageOutcome::Abort(message) => return FinalAnswer::failed(message),
        };
        if results.is_empty() {
            tracing::info!("Query returned no rows");
            return FinalAnswer::not_found(Some(results));
        }

        // Stage 4: explain. Failure degrades to a fixed apology.
        let explanation = match self
            .explain_stage(&normalized.english_text, &results)
            .await
        {
            StageOutcome::Ok(text) | StageOutcome::Degraded(text) => text,
            StageOutcome::Abort(message) => return FinalAnswer::failed(message),
        };

        // Stage 5: format back. Failure degrades to the unformatted text.
        let final_answer = match self.format_stage(&explanation, &normalized).await {
            StageOutcome::Ok(text) | StageOutcome::Degraded(text) => text,
            StageOutcome::Abort(message) => return FinalAnswer::failed(message),
        };

        FinalAnswer::answered(results, final_answer)
    }

    async fn normalize_stage(&self, raw: &str) -> StageOutcome<NormalizedQuery> {
        match self.normalizer.normalize(raw).await {
            Ok(normalized) => StageOutcome::Ok(normalized),
            Err(e) => {
                tracing::warn!("Normalization failed, using raw query: {}", e);
                StageOutcome::Degraded(NormalizedQuery::fallback(raw))
            }
        }
    }

    async fn execute_stage(&self, sql: &str) -> StageOutcome<ResultSet> {
        match self.executor.execute(sql).await {
            Ok(results) => StageOutcome::Ok(sanitize(results)),
            Err(e) => {
                tracing::error!("Database query failed: {}", e);
                StageOutcome::Abort("database query failed".to_string())
            }
        }
    }

    async fn explain_stage(&self, query: &str, results: &ResultSet) -> StageOutcome<String> {
        match self.explainer.explain(query, results).await {
            Ok(text) if !text.trim().is_empty() => StageOutcome::Ok(text),
            Ok(_) => {
                tracing::warn!("Explanation came back empty");
                StageOutcome::Degraded(EXPLANATION_APOLOGY.to_string())
            }
            Err(e) => {
                tracing::warn!("Explanation generation failed: {}", e);
                StageOutcome::Degraded(EXPLANATION_APOLOGY.to_string())
            }
        }
    }

    async fn format_stage(
        &self,
        explanation: &str,
        normalized: &NormalizedQuery,
    ) -> StageOutcome<String> {
        match self
            .formatter
            .format(explanation, &normalized.style, &normalized.language_code)
            .await
        {
            Ok(text) if !text.trim().is_empty() => StageOutcome::Ok(text),
            Ok(_) => {
                tracing::warn!("Formatting came back empty, returning unformatted explanation");
                StageOutcome::Degraded(explanation.to_string())
            }
            Err(e) => {
                tracing::warn!("Formatting failed, returning unformatted explanation: {}", e);
                StageOutcome::Degraded(explanation.to_string())
            }
        }
    }
}
