// Data access functions over the SeaORM connection.
pub mod category_service;
pub mod question_service;
