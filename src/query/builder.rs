//! Structured SQL construction.
//!
//! Simple queries are answered by a deterministic SQL template over the
//! fixed four-table schema. Compound queries (comparisons) are delegated to
//! the SQL generation capability, constrained by the same schema and rules.
//! Either way the builder never errors: a query it cannot produce comes back
//! as `None`.

use std::sync::Arc;

use crate::capability::SqlGenerator;
use crate::query::classifier::{
    classify, extract_place, extract_years, match_parameter, QueryShape, YearFilter,
};

/// Builds executable SQL from normalized English query text.
#[derive(Clone)]
pub struct QueryBuilder {
    generator: Arc<dyn SqlGenerator>,
}

impl QueryBuilder {
    pub fn new(generator: Arc<dyn SqlGenerator>) -> Self {
        Self { generator }
    }

    /// Build SQL for the given query text, or `None` when no usable query
    /// can be produced. Generation failures are absorbed here; the caller
    /// only ever sees the absence of a query.
    pub async fn build(&self, text: &str) -> Option<String> {
        match classify(text) {
            QueryShape::Simple => Some(self.build_simple(text)),
            QueryShape::Compound => self.build_compound(text).await,
        }
    }

    /// Deterministic single-place, single-parameter query: yearly average of
    /// the matched parameter, filtered by place and year condition, grouped
    /// and ordered by year.
    fn build_simple(&self, text: &str) -> String {
        let parameter = match_parameter(text);

        let mut predicates = vec![format!(
            "p.parameter_name ILIKE '{}'",
            escape_literal(parameter)
        )];

        if let Some(place) = extract_place(text) {
            let place = escape_literal(place);
            predicates.push(format!(
                "(c.city_name ILIKE '%{place}%' OR s.state_name ILIKE '%{place}%')"
            ));
        }

        match extract_years(text) {
            YearFilter::All => {}
            YearFilter::Single(year) => predicates.push(format!("yd.year = {year}")),
            YearFilter::Range(from, to) => {
                predicates.push(format!("yd.year BETWEEN {from} AND {to}"))
            }
        }

        format!(
            "SELECT yd.year, AVG(yd.value) AS value, p.unit \
             FROM yearly_data yd \
             JOIN cities c ON yd.city_id = c.city_id \
             JOIN states s ON c.state_id = s.state_id \
             JOIN parameters p ON yd.parameter_id = p.parameter_id \
             WHERE {} \
             GROUP BY yd.year, p.unit \
             ORDER BY yd.year",
            predicates.join(" AND ")
        )
    }

    /// Delegate comparison queries to the generation capability. Returned
    /// text is fence-stripped; anything still fenced or empty is treated as
    /// no query.
    async fn build_compound(&self, text: &str) -> Option<String> {
        let raw = match self.generator.generate(text).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("SQL generation failed for '{}': {}", text, e);
                return None;
            }
        };

        let sql = strip_fences(&raw);
        if sql.is_empty() || sql.contains("```") {
            tracing::warn!("SQL generation returned unusable text for '{}'", text);
            return None;
        }
        Some(sql)
    }
}

/// Strip a trivially-removable markdown fence: a leading ``` line (with or
/// without a language tag) and the matching trailing fence.
pub fn strip_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    let body = body.rsplit_once("```").map(|(body, _)| body).unwrap_or(body);
    body.trim().to_string()
}

/// Double single quotes for safe interpolation into a string literal.
fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}
