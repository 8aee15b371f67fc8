use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::questions::{CreateQuestionInput, SearchInput};
use crate::routes::quizzes::{QuizCategoryInput, QuizInput};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::categories::list,
        crate::routes::categories::questions,
        crate::routes::questions::list,
        crate::routes::questions::create,
        crate::routes::questions::search,
        crate::routes::questions::remove,
        crate::routes::quizzes::next_question,
    ),
    components(
        schemas(
            HealthResponse,
            CreateQuestionInput,
            SearchInput,
            QuizInput,
            QuizCategoryInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "categories"),
        (name = "questions"),
        (name = "quizzes")
    )
)]
pub struct ApiDoc;
