//! Catalog and quiz contracts driven through an in-memory repository.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use models::{category, question};
use service::catalog::{CatalogRepository, CatalogService, NewQuestion};
use service::errors::ServiceError;
use service::pagination::Paginator;
use service::quiz::{QuizService, ANY_CATEGORY};

struct InMemoryCatalog {
    categories: Vec<category::Model>,
    questions: Mutex<Vec<question::Model>>,
    next_id: AtomicI32,
}

impl InMemoryCatalog {
    fn new(categories: &[(i32, &str)]) -> Self {
        Self {
            categories: categories
                .iter()
                .map(|(id, kind)| category::Model { id: *id, kind: kind.to_string() })
                .collect(),
            questions: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    fn seed(&self, text: &str, answer: &str, category: i32, difficulty: i32) -> i32 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.questions.lock().unwrap().push(question::Model {
            id,
            question: text.to_string(),
            answer: answer.to_string(),
            category,
            difficulty,
            created_at: Utc::now().into(),
        });
        id
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_questions(&self) -> Result<Vec<question::Model>, ServiceError> {
        let mut rows = self.questions.lock().unwrap().clone();
        rows.sort_by_key(|q| q.id);
        Ok(rows)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<question::Model>, ServiceError> {
        let needle = term.to_lowercase();
        let mut rows: Vec<_> = self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        rows.sort_by_key(|q| q.id);
        Ok(rows)
    }

    async fn questions_by_category(&self, category_id: i32) -> Result<Vec<question::Model>, ServiceError> {
        let mut rows: Vec<_> = self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect();
        rows.sort_by_key(|q| q.id);
        Ok(rows)
    }

    async fn insert_question(&self, text: &str, answer: &str, category: i32, difficulty: i32) -> Result<question::Model, ServiceError> {
        // enforce the category reference like the real storage does
        if !self.categories.iter().any(|c| c.id == category) {
            return Err(ServiceError::Db(format!("foreign key violation: category {}", category)));
        }
        let id = self.seed(text, answer, category, difficulty);
        let rows = self.questions.lock().unwrap();
        Ok(rows.iter().find(|q| q.id == id).cloned().unwrap())
    }

    async fn delete_question(&self, id: i32) -> Result<bool, ServiceError> {
        let mut rows = self.questions.lock().unwrap();
        let before = rows.len();
        rows.retain(|q| q.id != id);
        Ok(rows.len() < before)
    }

    async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(self.categories.clone())
    }

    async fn category_by_id(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }
}

/// Twelve questions over {1: Science, 2: Art}, five of them in Art.
fn fixture() -> Arc<InMemoryCatalog> {
    let repo = Arc::new(InMemoryCatalog::new(&[(1, "Science"), (2, "Art")]));
    for i in 1..=7 {
        repo.seed(&format!("Science question number {}", i), "because physics", 1, 2);
    }
    for i in 1..=5 {
        repo.seed(&format!("Art question number {}", i), "a painter", 2, 3);
    }
    repo
}

fn catalog(repo: &Arc<InMemoryCatalog>) -> CatalogService<InMemoryCatalog> {
    CatalogService::new(Arc::clone(repo), Paginator::new(10))
}

#[tokio::test]
async fn list_questions_pages_are_stable_and_complete() {
    let repo = fixture();
    let svc = catalog(&repo);

    let page1 = svc.list_questions(1).await.unwrap();
    let page2 = svc.list_questions(2).await.unwrap();
    assert_eq!(page1.questions.len(), 10);
    assert_eq!(page2.questions.len(), 2);
    assert_eq!(page1.total_questions, 12);
    assert_eq!(page2.total_questions, 12);
    assert_eq!(page1.categories.get(&2).map(String::as_str), Some("Art"));

    // repeated reads return the same page
    let again = svc.list_questions(1).await.unwrap();
    assert_eq!(page1.questions, again.questions);

    // the union of all pages covers the catalog exactly once
    let mut ids: Vec<i32> = page1.questions.iter().chain(&page2.questions).map(|q| q.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 12);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn out_of_range_or_invalid_pages_fail() {
    let repo = fixture();
    let svc = catalog(&repo);

    assert!(matches!(svc.list_questions(3).await, Err(ServiceError::NotFound(_))));
    assert!(matches!(svc.list_questions(0).await, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn empty_catalog_listing_is_not_found() {
    let repo = Arc::new(InMemoryCatalog::new(&[(1, "Science")]));
    let svc = catalog(&repo);

    assert!(matches!(svc.list_questions(1).await, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() {
    let repo = fixture();
    let svc = catalog(&repo);

    let hits = svc.search_questions("ART QUESTION", 1).await.unwrap();
    assert_eq!(hits.total_questions, 5);
    assert_eq!(hits.questions.len(), 5);
    assert!(hits
        .questions
        .iter()
        .all(|q| q.question.to_lowercase().contains("art question")));

    // a broader term matches everything
    let all = svc.search_questions("question number", 1).await.unwrap();
    assert_eq!(all.total_questions, 12);
}

#[tokio::test]
async fn search_edge_cases() {
    let repo = fixture();
    let svc = catalog(&repo);

    assert!(matches!(
        svc.search_questions("", 1).await,
        Err(ServiceError::Unprocessable(_))
    ));
    assert!(matches!(
        svc.search_questions("no such text anywhere", 1).await,
        Err(ServiceError::NotFound(_))
    ));
    // matches exist, but the requested page is past them
    assert!(matches!(
        svc.search_questions("Art", 2).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn search_reports_category_of_last_question_on_page() {
    let repo = fixture();
    let svc = catalog(&repo);

    // ids 1..=7 are Science, 8..=12 are Art; one full page ends on id 10
    let page = svc.search_questions("question number", 1).await.unwrap();
    assert_eq!(page.questions.last().unwrap().id, 10);
    assert_eq!(page.current_category, 2);

    let narrowed = svc.search_questions("Science", 1).await.unwrap();
    assert_eq!(narrowed.current_category, 1);
}

#[tokio::test]
async fn category_filter_returns_only_that_category() {
    let repo = fixture();
    let svc = catalog(&repo);

    let listing = svc.list_by_category(2, 1).await.unwrap();
    assert_eq!(listing.total_questions, 5);
    assert_eq!(listing.questions.len(), 5);
    assert_eq!(listing.category_type, "Art");
    assert!(listing.questions.iter().all(|q| q.category == 2));
}

#[tokio::test]
async fn unknown_category_is_not_found_but_empty_category_is_not() {
    let repo = Arc::new(InMemoryCatalog::new(&[(1, "Science"), (3, "Geography")]));
    repo.seed("Science question", "because physics", 1, 1);
    let svc = catalog(&repo);

    assert!(matches!(svc.list_by_category(42, 1).await, Err(ServiceError::NotFound(_))));

    // an existing category with no questions is an empty success page
    let empty = svc.list_by_category(3, 1).await.unwrap();
    assert_eq!(empty.total_questions, 0);
    assert!(empty.questions.is_empty());
    assert_eq!(empty.category_type, "Geography");
}

#[tokio::test]
async fn create_rejects_missing_or_empty_fields() {
    let repo = fixture();
    let svc = catalog(&repo);

    let cases = [
        NewQuestion { question: "".into(), answer: "x".into(), category: 1, difficulty: 1 },
        NewQuestion { question: "x?".into(), answer: "".into(), category: 1, difficulty: 1 },
        NewQuestion { question: "x?".into(), answer: "x".into(), category: 0, difficulty: 1 },
        NewQuestion { question: "x?".into(), answer: "x".into(), category: 1, difficulty: 0 },
    ];
    for input in cases {
        assert!(matches!(
            svc.create_question(input).await,
            Err(ServiceError::Unprocessable(_))
        ));
    }

    // a category the storage does not know is unprocessable too
    let orphan = NewQuestion { question: "x?".into(), answer: "x".into(), category: 9, difficulty: 1 };
    assert!(matches!(
        svc.create_question(orphan).await,
        Err(ServiceError::Unprocessable(_))
    ));
}

#[tokio::test]
async fn create_then_delete_round_trip() {
    let repo = fixture();
    let svc = catalog(&repo);

    let input = NewQuestion {
        question: "What is the #1 search engine used today?".into(),
        answer: "Google".into(),
        category: 1,
        difficulty: 2,
    };
    let created = svc.create_question(input).await.unwrap();
    assert!(created.id > 0);

    let page2 = svc.list_questions(2).await.unwrap();
    assert!(page2.questions.iter().any(|q| q.id == created.id));
    assert_eq!(page2.total_questions, 13);

    let deleted = svc.delete_question(created.id).await.unwrap();
    assert_eq!(deleted, created.id);

    // deleting the same id again cannot succeed
    assert!(matches!(
        svc.delete_question(created.id).await,
        Err(ServiceError::Unprocessable(_))
    ));
}

#[tokio::test]
async fn quiz_avoids_previous_questions_until_exhaustion() {
    let repo = fixture();
    let quiz = QuizService::new(Arc::clone(&repo));

    let art_ids: Vec<i32> = repo.questions_by_category(2).await.unwrap().iter().map(|q| q.id).collect();
    assert_eq!(art_ids.len(), 5);

    // with four of five seen, the fifth is the only possible draw
    let seen = &art_ids[..4];
    for _ in 0..25 {
        let picked = quiz.next_question(2, seen).await.unwrap();
        assert_eq!(picked.id, art_ids[4]);
    }

    // full history means no eligible question, reported rather than retried
    assert!(matches!(
        quiz.next_question(2, &art_ids).await,
        Err(ServiceError::Unprocessable(_))
    ));
}

#[tokio::test]
async fn quiz_sentinel_draws_from_the_whole_catalog() {
    let repo = fixture();
    let quiz = QuizService::new(Arc::clone(&repo));

    let all_ids: Vec<i32> = repo.list_questions().await.unwrap().iter().map(|q| q.id).collect();
    let picked = quiz.next_question(ANY_CATEGORY, &[]).await.unwrap();
    assert!(all_ids.contains(&picked.id));

    // excluding everything exhausts the unrestricted candidate set as well
    assert!(matches!(
        quiz.next_question(ANY_CATEGORY, &all_ids).await,
        Err(ServiceError::Unprocessable(_))
    ));

    // an unknown category has no candidates at all
    assert!(matches!(
        quiz.next_question(99, &[]).await,
        Err(ServiceError::Unprocessable(_))
    ));
}
