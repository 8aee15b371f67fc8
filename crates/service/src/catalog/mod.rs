pub mod repository;
pub mod service;

pub use repository::{CatalogRepository, SeaOrmCatalogRepository};
pub use service::{
    CatalogService, CategoryListing, NewQuestion, QuestionListing, QuestionPayload, SearchListing,
};
