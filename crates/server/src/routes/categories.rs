use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::ApiError;
use crate::routes::questions::{page_from, PageQuery};
use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/categories", tag = "categories",
    responses(
        (status = 200, description = "All categories as an id to type map"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Value>, ApiError> {
    let categories = state.catalog.list_categories().await?;
    info!(count = categories.len(), "list categories");
    Ok(Json(json!({
        "success": true,
        "categories": categories,
    })))
}

#[utoipa::path(
    get, path = "/categories/{id}/questions", tag = "categories",
    params(("id" = i32, Path, description = "Category ID"), PageQuery),
    responses(
        (status = 200, description = "Questions of the category"),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn questions(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(category_id) = path.map_err(|e| ApiError::bad_request(e.to_string()))?;
    let page = page_from(query)?;
    let listing = state.catalog.list_by_category(category_id, page).await?;
    info!(category_id, count = listing.questions.len(), total = listing.total_questions, "list questions by category");
    // `categories` carries the matched category's type label here, an
    // inherited quirk of the public contract
    Ok(Json(json!({
        "success": true,
        "questions": listing.questions,
        "totalQuestions": listing.total_questions,
        "categories": listing.category_type,
    })))
}
