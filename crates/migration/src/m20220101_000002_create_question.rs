//! Create `question` table with FK to `category`.
//!
//! Ids are storage-assigned and ordered; listings rely on that ordering.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Question::Table)
                    .if_not_exists()
                    .col(pk_auto(Question::Id))
                    .col(text(Question::Question).not_null())
                    .col(text(Question::Answer).not_null())
                    .col(integer(Question::Category).not_null())
                    .col(integer(Question::Difficulty).not_null())
                    .col(timestamp_with_time_zone(Question::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_category")
                            .from(Question::Table, Question::Category)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Question::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Question { Table, Id, Question, Answer, Category, Difficulty, CreatedAt }

#[derive(DeriveIden)]
enum Category { Table, Id }
