use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use service::catalog::NewQuestion;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateQuestionInput {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub category: Option<i32>,
    #[serde(default)]
    pub difficulty: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SearchInput {
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
}

/// Non-numeric page input is a caller error, rendered in the uniform
/// envelope rather than axum's default rejection body.
pub(crate) fn page_from(query: Result<Query<PageQuery>, QueryRejection>) -> Result<u32, ApiError> {
    let Query(q) = query.map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(q.page.unwrap_or(1))
}

#[utoipa::path(
    get, path = "/questions", tag = "questions",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of questions with totals and the category map"),
        (status = 404, description = "Page is empty"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let page = page_from(query)?;
    let listing = state.catalog.list_questions(page).await?;
    info!(page, count = listing.questions.len(), total = listing.total_questions, "list questions");
    Ok(Json(json!({
        "success": true,
        "questions": listing.questions,
        "totalQuestions": listing.total_questions,
        "categories": listing.categories,
    })))
}

#[utoipa::path(
    post, path = "/questions", tag = "questions",
    request_body = CreateQuestionInput,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Missing or empty fields, or the insert failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<CreateQuestionInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = body.map_err(|e| ApiError::bad_request(e.to_string()))?;
    // absent fields fall through as empty/zero and fail the same narrow
    // validation as explicit empties
    let input = NewQuestion {
        question: input.question.unwrap_or_default(),
        answer: input.answer.unwrap_or_default(),
        category: input.category.unwrap_or_default(),
        difficulty: input.difficulty.unwrap_or_default(),
    };
    let created = state.catalog.create_question(input).await?;
    Ok(Json(json!({
        "success": true,
        "question": created.question,
        "answer": created.answer,
        "difficulty": created.difficulty,
        "category": created.category,
    })))
}

#[utoipa::path(
    post, path = "/questions/search", tag = "questions",
    request_body = SearchInput,
    params(PageQuery),
    responses(
        (status = 200, description = "Matching questions"),
        (status = 404, description = "No question matches the term"),
        (status = 422, description = "Empty search term")
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<SearchInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let page = page_from(query)?;
    let Json(input) = body.map_err(|e| ApiError::bad_request(e.to_string()))?;
    let term = input.search_term.unwrap_or_default();
    let results = state.catalog.search_questions(&term, page).await?;
    info!(term = %term, count = results.questions.len(), total = results.total_questions, "search questions");
    Ok(Json(json!({
        "success": true,
        "questions": results.questions,
        "totalQuestions": results.total_questions,
        "current_category": results.current_category,
    })))
}

#[utoipa::path(
    delete, path = "/questions/{id}", tag = "questions",
    params(("id" = i32, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 422, description = "No such question or the delete failed")
    )
)]
pub async fn remove(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = path.map_err(|e| ApiError::bad_request(e.to_string()))?;
    let deleted_id = state.catalog.delete_question(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Question successfully deleted",
        "delete_id": deleted_id,
    })))
}
