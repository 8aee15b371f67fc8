use async_trait::async_trait;
use models::{category, question};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Persistence seam for the catalog. Owns no business logic; every listing
/// returns rows ordered by id.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_questions(&self) -> Result<Vec<question::Model>, ServiceError>;
    async fn search_questions(&self, term: &str) -> Result<Vec<question::Model>, ServiceError>;
    async fn questions_by_category(&self, category_id: i32) -> Result<Vec<question::Model>, ServiceError>;
    async fn insert_question(&self, question: &str, answer: &str, category: i32, difficulty: i32) -> Result<question::Model, ServiceError>;
    async fn delete_question(&self, id: i32) -> Result<bool, ServiceError>;
    async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError>;
    async fn category_by_id(&self, id: i32) -> Result<Option<category::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCatalogRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn list_questions(&self) -> Result<Vec<question::Model>, ServiceError> {
        crate::db::question_service::list_questions(&self.db).await
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<question::Model>, ServiceError> {
        crate::db::question_service::search_questions(&self.db, term).await
    }

    async fn questions_by_category(&self, category_id: i32) -> Result<Vec<question::Model>, ServiceError> {
        crate::db::question_service::questions_by_category(&self.db, category_id).await
    }

    async fn insert_question(&self, question: &str, answer: &str, category: i32, difficulty: i32) -> Result<question::Model, ServiceError> {
        crate::db::question_service::insert_question(&self.db, question, answer, category, difficulty).await
    }

    async fn delete_question(&self, id: i32) -> Result<bool, ServiceError> {
        crate::db::question_service::delete_question(&self.db, id).await
    }

    async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        crate::db::category_service::list_categories(&self.db).await
    }

    async fn category_by_id(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
        crate::db::category_service::category_by_id(&self.db, id).await
    }
}
