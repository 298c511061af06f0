use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create accounts table
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::ExternalId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Accounts::Handle).string_len(255).unique_key())
                    .col(ColumnDef::new(Accounts::FirstName).string_len(255))
                    .col(ColumnDef::new(Accounts::LastName).string_len(255))
                    .col(ColumnDef::new(Accounts::Email).string_len(255).unique_key())
                    .col(
                        ColumnDef::new(Accounts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Accounts::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Accounts::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create courseworks table
        manager
            .create_table(
                Table::create()
                    .table(Courseworks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courseworks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courseworks::AccountId).integer().not_null())
                    .col(ColumnDef::new(Courseworks::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Courseworks::Description).text())
                    .col(
                        ColumnDef::new(Courseworks::Status)
                            .text()
                            .not_null()
                            .default("draft")
                            .check(Expr::col(Courseworks::Status).is_in([
                                "draft",
                                "in_progress",
                                "completed",
                            ])),
                    )
                    .col(
                        ColumnDef::new(Courseworks::ProgressPercentage)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Courseworks::ProgressPercentage).between(0, 100)),
                    )
                    .col(ColumnDef::new(Courseworks::Deadline).date_time())
                    .col(ColumnDef::new(Courseworks::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Courseworks::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courseworks-account_id")
                            .from(Courseworks::Table, Courseworks::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create topics table
        manager
            .create_table(
                Table::create()
                    .table(Topics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Topics::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Topics::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Topics::Description).text())
                    .col(ColumnDef::new(Topics::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Topics::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create chapters table
        manager
            .create_table(
                Table::create()
                    .table(Chapters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Chapters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Chapters::CourseworkId).integer().not_null())
                    .col(ColumnDef::new(Chapters::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Chapters::Content).text())
                    .col(ColumnDef::new(Chapters::Order).integer().not_null())
                    .col(
                        ColumnDef::new(Chapters::Status)
                            .text()
                            .not_null()
                            .default("pending")
                            .check(Expr::col(Chapters::Status).is_in([
                                "pending",
                                "in_progress",
                                "completed",
                            ])),
                    )
                    .col(ColumnDef::new(Chapters::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Chapters::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-chapters-coursework_id")
                            .from(Chapters::Table, Chapters::CourseworkId)
                            .to(Courseworks::Table, Courseworks::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create references table
        manager
            .create_table(
                Table::create()
                    .table(References::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(References::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(References::Title).string_len(255).not_null())
                    .col(ColumnDef::new(References::Authors).string_len(500))
                    .col(ColumnDef::new(References::SourceUrl).string_len(500))
                    .col(ColumnDef::new(References::PublicationYear).integer())
                    .col(
                        ColumnDef::new(References::ReferenceType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(References::CitationFormat).text())
                    .col(ColumnDef::new(References::Notes).text())
                    .col(ColumnDef::new(References::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(References::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create coursework_topics junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(CourseworkTopics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseworkTopics::CourseworkId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseworkTopics::TopicId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CourseworkTopics::CourseworkId)
                            .col(CourseworkTopics::TopicId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-coursework_topics-coursework_id")
                            .from(CourseworkTopics::Table, CourseworkTopics::CourseworkId)
                            .to(Courseworks::Table, Courseworks::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-coursework_topics-topic_id")
                            .from(CourseworkTopics::Table, CourseworkTopics::TopicId)
                            .to(Topics::Table, Topics::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create chapter_references junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(ChapterReferences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChapterReferences::ChapterId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChapterReferences::ReferenceId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ChapterReferences::ChapterId)
                            .col(ChapterReferences::ReferenceId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-chapter_references-chapter_id")
                            .from(ChapterReferences::Table, ChapterReferences::ChapterId)
                            .to(Chapters::Table, Chapters::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-chapter_references-reference_id")
                            .from(ChapterReferences::Table, ChapterReferences::ReferenceId)
                            .to(References::Table, References::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(ChapterReferences::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseworkTopics::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(References::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Chapters::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Topics::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courseworks::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    ExternalId,
    Handle,
    FirstName,
    LastName,
    Email,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Courseworks {
    Table,
    Id,
    AccountId,
    Title,
    Description,
    Status,
    ProgressPercentage,
    Deadline,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Topics {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Chapters {
    Table,
    Id,
    CourseworkId,
    Title,
    Content,
    Order,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum References {
    Table,
    Id,
    Title,
    Authors,
    SourceUrl,
    PublicationYear,
    ReferenceType,
    CitationFormat,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CourseworkTopics {
    Table,
    CourseworkId,
    TopicId,
}

#[derive(Iden)]
enum ChapterReferences {
    Table,
    ChapterId,
    ReferenceId,
}
