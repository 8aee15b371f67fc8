use chrono::Utc;
use models::question::{self, Entity as QuestionEntity};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::ServiceError;

/// List every question ordered by id; stable order keeps pages deterministic.
pub async fn list_questions(db: &DatabaseConnection) -> Result<Vec<question::Model>, ServiceError> {
    let rows = QuestionEntity::find()
        .order_by_asc(question::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Case-insensitive substring search over question text.
pub async fn search_questions(
    db: &DatabaseConnection,
    term: &str,
) -> Result<Vec<question::Model>, ServiceError> {
    let pattern = format!("%{}%", term);
    let rows = QuestionEntity::find()
        .filter(Expr::col(question::Column::Question).ilike(pattern))
        .order_by_asc(question::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Questions belonging to one category, ordered by id.
pub async fn questions_by_category(
    db: &DatabaseConnection,
    category_id: i32,
) -> Result<Vec<question::Model>, ServiceError> {
    let rows = QuestionEntity::find()
        .filter(question::Column::Category.eq(category_id))
        .order_by_asc(question::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Insert a question; the id is assigned by storage. Constraint violations
/// (a category id with no category row) come back as a Db error for the
/// service layer to reinterpret.
pub async fn insert_question(
    db: &DatabaseConnection,
    question_text: &str,
    answer: &str,
    category: i32,
    difficulty: i32,
) -> Result<question::Model, ServiceError> {
    let am = question::ActiveModel {
        question: Set(question_text.to_string()),
        answer: Set(answer.to_string()),
        category: Set(category),
        difficulty: Set(difficulty),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Delete a question; returns true if a row was removed.
pub async fn delete_question(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = QuestionEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
