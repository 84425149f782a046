//! End-to-end pipeline tests over stub capabilities.

use std::sync::Arc;

use aquifer::{
    Cell, IntentKind, NormalizedQuery, Pipeline, QueryBuilder, ResultSet,
};
use rust_decimal::Decimal;

use crate::mocks::{
    RecordingExecutor, StubExplainer, StubFormatter, StubGenerator, StubNormalizer,
};

struct Harness {
    pipeline: Pipeline,
    executor: Arc<RecordingExecutor>,
    explainer: Arc<StubExplainer>,
}

fn business_query(text: &str) -> NormalizedQuery {
    NormalizedQuery {
        english_text: text.to_string(),
        language_code: "en".to_string(),
        style: "english".to_string(),
        intent: IntentKind::Business,
    }
}

fn one_row_results() -> ResultSet {
    ResultSet {
        columns: vec!["year".to_string(), "value".to_string(), "unit".to_string()],
        rows: vec![vec![
            Cell::Int(2010),
            Cell::Decimal(Decimal::new(31250, 2)),
            Cell::Text("m".to_string()),
        ]],
    }
}

fn harness(
    normalizer: StubNormalizer,
    generator: StubGenerator,
    executor_response: Result<ResultSet, ()>,
    explainer_response: Option<&str>,
    formatter_response: Option<&str>,
) -> Harness {
    let executor = Arc::new(RecordingExecutor::new(executor_response));
    let explainer = Arc::new(StubExplainer::new(explainer_response));
    let pipeline = Pipeline::new(
        Arc::new(normalizer),
        QueryBuilder::new(Arc::new(generator)),
        executor.clone(),
        explainer.clone(),
        Arc::new(StubFormatter(formatter_response.map(str::to_string))),
    );
    Harness {
        pipeline,
        executor,
        explainer,
    }
}

#[tokio::test]
async fn test_simple_query_end_to_end() {
    let h = harness(
        StubNormalizer(Some(business_query("water level of Ayodhya in 2010"))),
        StubGenerator(None),
        Ok(one_row_results()),
        Some("- Water level of Ayodhya in 2010 was 312.5 m."),
        Some("Ayodhya ka jal star 2010 mein 312.5 m tha."),
    );

    let answer = h.pipeline.run("Ayodhya ka pani ka star 2010 mein?").await;

    assert_eq!(
        answer.final_answer.as_deref(),
        Some("Ayodhya ka jal star 2010 mein 312.5 m tha.")
    );
    assert!(answer.message.is_none());

    // The simple path built the query itself; the generator was never used.
    let sql = h.executor.last_sql().unwrap();
    assert!(sql.contains("p.parameter_name ILIKE 'Groundwater Level'"));
    assert!(sql.contains("c.city_name ILIKE '%Ayodhya%'"));
    assert!(sql.contains("yd.year = 2010"));

    // NUMERIC values are sanitized to plain floats before explanation.
    let results = answer.results.unwrap();
    assert_eq!(results.rows[0][1], Cell::Float(312.5));
}

#[tokio::test]
async fn test_compound_query_uses_generated_sql() {
    let generated = "SELECT s.state_name, yd.year, AVG(yd.value) AS avg_value, p.unit \
                     FROM yearly_data yd \
                     JOIN cities c ON yd.city_id = c.city_id \
                     JOIN states s ON c.state_id = s.state_id \
                     JOIN parameters p ON yd.parameter_id = p.parameter_id \
                     WHERE p.parameter_name ILIKE 'Rainfall' \
                     GROUP BY s.state_name, yd.year, p.unit";
    let h = harness(
        StubNormalizer(Some(business_query(
            "compare rainfall between Uttar Pradesh and Bihar",
        ))),
        StubGenerator(Some(generated.to_string())),
        Ok(one_row_results()),
        Some("- Uttar Pradesh received more rainfall than Bihar."),
        Some("Uttar Pradesh received more rainfall than Bihar."),
    );

    let answer = h.pipeline.run("compare rainfall between Uttar Pradesh and Bihar").await;

    // The simple-path template must not be applied to a comparison.
    assert_eq!(h.executor.last_sql().as_deref(), Some(generated));
    assert!(answer.final_answer.is_some());
}

#[tokio::test]
async fn test_generation_failure_aborts_without_execution() {
    let h = harness(
        StubNormalizer(Some(business_query(
            "compare rainfall between Uttar Pradesh and Bihar",
        ))),
        StubGenerator(None),
        Ok(one_row_results()),
        Some("- unused"),
        Some("unused"),
    );

    let answer = h.pipeline.run("compare rainfall between Uttar Pradesh and Bihar").await;

    assert_eq!(answer.message.as_deref(), Some("data not found"));
    assert!(answer.results.is_none());
    assert!(answer.final_answer.is_none());
    assert_eq!(h.executor.call_count(), 0);
}

#[tokio::test]
async fn test_zero_rows_aborts_without_explanation() {
    let h = harness(
        StubNormalizer(Some(business_query("rainfall of Mirzapur"))),
        StubGenerator(None),
        Ok(ResultSet::empty()),
        Some("- unused"),
        Some("unused"),
    );

    let answer = h.pipeline.run("rainfall of Mirzapur").await;

    assert_eq!(answer.message.as_deref(), Some("data not found"));
    assert_eq!(answer.results, Some(ResultSet::empty()));
    assert!(answer.final_answer.is_none());
    assert_eq!(h.explainer.call_count(), 0);
}

#[tokio::test]
async fn test_execution_failure_aborts_with_db_message() {
    let h = harness(
        StubNormalizer(Some(business_query("rainfall of Mirzapur"))),
        StubGenerator(None),
        Err(()),
        Some("- unused"),
        Some("unused"),
    );

    let answer = h.pipeline.run("rainfall of Mirzapur").await;

    assert_eq!(answer.message.as_deref(), Some("database query failed"));
    assert!(answer.results.is_none());
    assert!(answer.final_answer.is_none());
}

#[tokio::test]
async fn test_normalizer_failure_degrades_to_raw_text() {
    let h = harness(
        StubNormalizer(None),
        StubGenerator(None),
        Ok(one_row_results()),
        Some("- Water level of Ayodhya in 2010 was 312.5 m."),
        Some("Water level of Ayodhya in 2010 was 312.5 m."),
    );

    let answer = h.pipeline.run("water level of Ayodhya in 2010").await;

    // The raw text drove the builder, and the pipeline still answered.
    let sql = h.executor.last_sql().unwrap();
    assert!(sql.contains("'%Ayodhya%'"));
    assert!(answer.final_answer.is_some());
    assert!(answer.message.is_none());
}

#[tokio::test]
async fn test_explanation_failure_degrades_to_apology() {
    let h = harness(
        StubNormalizer(Some(business_query("rainfall of Mirzapur"))),
        StubGenerator(None),
        Ok(one_row_results()),
        None,
        None,
    );

    let answer = h.pipeline.run("rainfall of Mirzapur").await;

    // Explanation and formatting both failed; the apology text survives and
    // the results are still returned.
    assert_eq!(
        answer.final_answer.as_deref(),
        Some("Sorry, couldn't generate explanation.")
    );
    assert!(answer.results.is_some());
    assert!(answer.message.is_none());
}

#[tokio::test]
async fn test_formatting_failure_returns_unformatted_explanation() {
    let h = harness(
        StubNormalizer(Some(business_query("rainfall of Mirzapur"))),
        StubGenerator(None),
        Ok(one_row_results()),
        Some("- Rainfall in Mirzapur averaged 740 mm."),
        None,
    );

    let answer = h.pipeline.run("barish Mirzapur mein kitni hui?").await;

    assert_eq!(
        answer.final_answer.as_deref(),
        Some("- Rainfall in Mirzapur averaged 740 mm.")
    );
    assert!(answer.results.is_some());
}

#[tokio::test]
async fn test_final_answer_wire_shape() {
    let h = harness(
        StubNormalizer(Some(business_query("rainfall of Mirzapur"))),
        StubGenerator(None),
        Ok(one_row_results()),
        Some("- Rainfall in Mirzapur averaged 740 mm."),
        Some("Mirzapur mein average 740 mm barish hui."),
    );

    let answer = h.pipeline.run("rainfall of Mirzapur").await;
    let json = serde_json::to_value(&answer).unwrap();

    assert!(json.get("message").is_none());
    assert_eq!(json["final_answer"], "Mirzapur mein average 740 mm barish hui.");
    assert_eq!(json["results"]["columns"][0], "year");
    assert_eq!(json["results"]["rows"][0][1], 312.5);
}
