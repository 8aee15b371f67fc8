use models::category::{self, Entity as CategoryEntity};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::errors::ServiceError;

/// List all categories ordered by id.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>, ServiceError> {
    let rows = CategoryEntity::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Get a category by id.
pub async fn category_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<category::Model>, ServiceError> {
    let found = CategoryEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seeded_categories_listed_in_order() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let categories = list_categories(&db).await?;
        assert!(categories.len() >= 6);
        assert!(categories.windows(2).all(|w| w[0].id < w[1].id));

        let first = category_by_id(&db, categories[0].id).await?;
        assert!(first.is_some());
        let missing = category_by_id(&db, 999_999).await?;
        assert!(missing.is_none());

        Ok(())
    }
}
