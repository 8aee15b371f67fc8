use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use service::catalog::QuestionPayload;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct QuizCategoryInput {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct QuizInput {
    #[serde(default)]
    pub previous_questions: Option<Vec<i32>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategoryInput>,
}

#[utoipa::path(
    post, path = "/quizzes", tag = "quizzes",
    request_body = QuizInput,
    responses(
        (status = 200, description = "One random question outside the history"),
        (status = 400, description = "Missing category selector or history"),
        (status = 422, description = "Every candidate has been seen")
    )
)]
pub async fn next_question(
    State(state): State<ServerState>,
    body: Result<Json<QuizInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = body.map_err(|e| ApiError::bad_request(e.to_string()))?;
    let Some(selector) = input.quiz_category else {
        return Err(ApiError::bad_request("quiz_category is required"));
    };
    let Some(category_id) = selector.id else {
        return Err(ApiError::bad_request("quiz_category.id is required"));
    };
    let Some(previous) = input.previous_questions else {
        return Err(ApiError::bad_request("previous_questions is required"));
    };
    let question = state.quiz.next_question(category_id, &previous).await?;
    info!(category_id, question_id = question.id, seen = previous.len(), "quiz question served");
    Ok(Json(json!({
        "success": true,
        "question": QuestionPayload::from(&question),
    })))
}
