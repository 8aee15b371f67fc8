use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::catalog::{CatalogService, SeaOrmCatalogRepository};
use service::quiz::QuizService;

pub mod categories;
pub mod questions;
pub mod quizzes;

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<CatalogService<SeaOrmCatalogRepository>>,
    pub quiz: Arc<QuizService<SeaOrmCatalogRepository>>,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: catalog routes, quiz route, health.
/// `/category` and `/question` are legacy singular aliases kept for old
/// clients.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/categories", get(categories::list))
        .route("/category", get(categories::list))
        .route("/categories/:id/questions", get(categories::questions))
        .route("/questions", get(questions::list).post(questions::create))
        .route("/question", get(questions::list))
        .route("/questions/search", post(questions::search))
        .route("/questions/:id", delete(questions::remove))
        .route("/quizzes", post(quizzes::next_question))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
