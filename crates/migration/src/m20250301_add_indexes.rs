use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on courseworks.account_id for listing an account's projects
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courseworks_account_id")
                    .table(Courseworks::Table)
                    .col(Courseworks::AccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courseworks_status")
                    .table(Courseworks::Table)
                    .col(Courseworks::Status)
                    .to_owned(),
            )
            .await?;

        // Chapters are always read in order within one coursework
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_chapters_coursework_id_order")
                    .table(Chapters::Table)
                    .col(Chapters::CourseworkId)
                    .col(Chapters::Order)
                    .to_owned(),
            )
            .await?;

        // The composite primary keys cover lookups from the left side only
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_coursework_topics_topic_id")
                    .table(CourseworkTopics::Table)
                    .col(CourseworkTopics::TopicId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_chapter_references_reference_id")
                    .table(ChapterReferences::Table)
                    .col(ChapterReferences::ReferenceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_chapter_references_reference_id",
            "idx_coursework_topics_topic_id",
            "idx_chapters_coursework_id_order",
            "idx_courseworks_status",
            "idx_courseworks_account_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Courseworks {
    Table,
    AccountId,
    Status,
}

#[derive(Iden)]
enum Chapters {
    Table,
    CourseworkId,
    Order,
}

#[derive(Iden)]
enum CourseworkTopics {
    Table,
    TopicId,
}

#[derive(Iden)]
enum ChapterReferences {
    Table,
    ReferenceId,
}
