//! HTTP router construction.

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::{
    format_answer_handler, normalize_handler, pipeline_handler, root_handler, to_sql_handler,
    ApiState,
};
use crate::config::ServerConfig;

/// Create the HTTP router.
///
/// Endpoints:
/// - GET  /                  - liveness check
/// - POST /nlp/normalize     - normalize a query into clean English
/// - POST /nlp/format-answer - adapt an answer to the user's style
/// - POST /nlp/to-sql        - build and execute SQL for a query
/// - POST /nlp/pipeline      - run the full answer pipeline
pub fn create_router(state: Arc<ApiState>, config: &ServerConfig) -> Router {
    let nlp_routes = Router::new()
        .route("/normalize", post(normalize_handler))
        .route("/format-answer", post(format_answer_handler))
        .route("/to-sql", post(to_sql_handler))
        .route("/pipeline", post(pipeline_handler))
        .with_state(state);

    let router = Router::new()
        .route("/", get(root_handler))
        .nest("/nlp", nlp_routes);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_origin(Any);

        router.layer(cors)
    } else {
        router
    }
}
