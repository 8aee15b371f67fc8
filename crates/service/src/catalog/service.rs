use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use models::question;

use crate::catalog::repository::CatalogRepository;
use crate::errors::ServiceError;
use crate::pagination::Paginator;

/// Wire format for a question, shared by every listing operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuestionPayload {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: i32,
}

impl From<&question::Model> for QuestionPayload {
    fn from(m: &question::Model) -> Self {
        Self {
            id: m.id,
            question: m.question.clone(),
            answer: m.answer.clone(),
            difficulty: m.difficulty,
            category: m.category,
        }
    }
}

/// One page of the whole catalog. `total_questions` counts the entire
/// unpaginated set so clients can derive page counts.
#[derive(Debug, Serialize)]
pub struct QuestionListing {
    pub questions: Vec<QuestionPayload>,
    pub total_questions: usize,
    pub categories: BTreeMap<i32, String>,
}

#[derive(Debug, Serialize)]
pub struct SearchListing {
    pub questions: Vec<QuestionPayload>,
    pub total_questions: usize,
    pub current_category: i32,
}

#[derive(Debug, Serialize)]
pub struct CategoryListing {
    pub questions: Vec<QuestionPayload>,
    pub total_questions: usize,
    pub category_type: String,
}

#[derive(Clone, Debug)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

/// Application service encapsulating catalog business rules: pagination,
/// substring search, category filtering and create/delete validation.
pub struct CatalogService<R: CatalogRepository> {
    repo: Arc<R>,
    paginator: Paginator,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: Arc<R>, paginator: Paginator) -> Self {
        Self { repo, paginator }
    }

    fn check_page(page: u32) -> Result<(), ServiceError> {
        if page == 0 {
            return Err(ServiceError::BadRequest("page must be a positive integer".into()));
        }
        Ok(())
    }

    async fn category_map(&self) -> Result<BTreeMap<i32, String>, ServiceError> {
        // Recomputed on every listing call; the catalog is small and read-mostly.
        let categories = self.repo.list_categories().await?;
        Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
    }

    /// One page of questions plus the overall count and the category map.
    /// An empty page, including the empty-catalog case, is not found.
    pub async fn list_questions(&self, page: u32) -> Result<QuestionListing, ServiceError> {
        Self::check_page(page)?;
        let questions = self.repo.list_questions().await?;
        let total_questions = questions.len();
        let current = self.paginator.page_slice(&questions, page);
        if current.is_empty() {
            return Err(ServiceError::not_found("questions page"));
        }
        let categories = self.category_map().await?;
        Ok(QuestionListing {
            questions: current.iter().map(QuestionPayload::from).collect(),
            total_questions,
            categories,
        })
    }

    pub async fn list_categories(&self) -> Result<BTreeMap<i32, String>, ServiceError> {
        self.category_map().await
    }

    /// Case-insensitive substring search. `current_category` reflects
    /// whichever question lands last in the returned page, not a property
    /// of the whole result set.
    pub async fn search_questions(&self, term: &str, page: u32) -> Result<SearchListing, ServiceError> {
        Self::check_page(page)?;
        if term.is_empty() {
            return Err(ServiceError::Unprocessable("search term must not be empty".into()));
        }
        let matches = self.repo.search_questions(term).await?;
        let total_questions = matches.len();
        let current = self.paginator.page_slice(&matches, page);
        let Some(last) = current.last() else {
            return Err(ServiceError::not_found("matching questions"));
        };
        Ok(SearchListing {
            current_category: last.category,
            questions: current.iter().map(QuestionPayload::from).collect(),
            total_questions,
        })
    }

    /// Questions of one category. Unknown category ids are not found; an
    /// existing category with no questions is an empty success page.
    pub async fn list_by_category(&self, category_id: i32, page: u32) -> Result<CategoryListing, ServiceError> {
        Self::check_page(page)?;
        let category = self
            .repo
            .category_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("category"))?;
        let questions = self.repo.questions_by_category(category_id).await?;
        let total_questions = questions.len();
        let current = self.paginator.page_slice(&questions, page);
        Ok(CategoryListing {
            questions: current.iter().map(QuestionPayload::from).collect(),
            total_questions,
            category_type: category.kind,
        })
    }

    /// Create with the catalog's narrow validation: fields present and
    /// non-empty, nothing more. Insert failures, including category
    /// references the storage rejects, are unprocessable input rather than
    /// server errors.
    #[instrument(skip(self, input), fields(category = input.category))]
    pub async fn create_question(&self, input: NewQuestion) -> Result<question::Model, ServiceError> {
        if input.question.is_empty()
            || input.answer.is_empty()
            || input.category == 0
            || input.difficulty == 0
        {
            return Err(ServiceError::Unprocessable(
                "question, answer, category and difficulty are required".into(),
            ));
        }
        let created = self
            .repo
            .insert_question(&input.question, &input.answer, input.category, input.difficulty)
            .await
            .map_err(|e| match e {
                ServiceError::Db(msg) => ServiceError::Unprocessable(msg),
                other => other,
            })?;
        info!(id = created.id, category = created.category, "created question");
        Ok(created)
    }

    /// Delete by id, confirming the deleted id. A missing row and a storage
    /// delete failure report the same kind; callers cannot tell them apart
    /// through this operation.
    pub async fn delete_question(&self, id: i32) -> Result<i32, ServiceError> {
        let deleted = self.repo.delete_question(id).await.map_err(|e| match e {
            ServiceError::Db(msg) => ServiceError::Unprocessable(msg),
            other => other,
        })?;
        if !deleted {
            return Err(ServiceError::Unprocessable(format!("question {} does not exist", id)));
        }
        info!(id, "deleted question");
        Ok(id)
    }
}
