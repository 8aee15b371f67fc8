//! Seed the six standard trivia categories.
//!
//! Categories are read-only at the API surface; this is the only writer.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let insert = Query::insert()
            .into_table(Category::Table)
            .columns([Category::Type])
            .values_panic(["Science".into()])
            .values_panic(["Art".into()])
            .values_panic(["Geography".into()])
            .values_panic(["History".into()])
            .values_panic(["Entertainment".into()])
            .values_panic(["Sports".into()])
            .to_owned();
        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Category::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Category { Table, Type }
