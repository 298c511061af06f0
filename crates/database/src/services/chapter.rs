use crate::{
    entities::{chapter_references, chapters, references},
    error::StoreError,
    services::{
        cascade::{self, DeleteSummary},
        coursework::CourseworkService,
        fields::{self, SHORT_TEXT},
        reference::ReferenceService,
    },
};
use log::{debug, info};
use models::ChapterStatus;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait,
    sea_query::OnConflict,
};

/// Fields accepted when a chapter is added
///
/// `order` is not required to be unique within the coursework.
#[derive(Debug, Clone, Default)]
pub struct NewChapter {
    pub title: String,
    pub order: i32,
    pub content: Option<String>,
    pub status: ChapterStatus,
}

impl NewChapter {
    pub fn new(title: impl Into<String>, order: i32) -> Self {
        Self {
            title: title.into(),
            order,
            ..Self::default()
        }
    }
}

/// Editable chapter fields; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ChapterDetails {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub order: Option<i32>,
}

pub struct ChapterService;

impl ChapterService {
    pub async fn add_chapter(
        db: &DatabaseConnection,
        coursework_id: i32,
        new_chapter: NewChapter,
    ) -> Result<chapters::Model, StoreError> {
        let title = fields::required("title", new_chapter.title, SHORT_TEXT)?;
        let content = fields::optional("content", new_chapter.content, None)?;
        let now = fields::now();

        let txn = db.begin().await?;
        CourseworkService::require(&txn, coursework_id).await?;

        let chapter = chapters::ActiveModel {
            id: NotSet,
            coursework_id: Set(coursework_id),
            title: Set(title),
            content: Set(content),
            order: Set(new_chapter.order),
            status: Set(new_chapter.status),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Added chapter {} at position {} to coursework {coursework_id}",
            chapter.id, chapter.order
        );
        Ok(chapter)
    }

    pub async fn get_chapter(
        db: &DatabaseConnection,
        chapter_id: i32,
    ) -> Result<chapters::Model, StoreError> {
        Self::require(db, chapter_id).await
    }

    /// Lists a coursework's chapters by `order`, ties broken by creation order
    pub async fn list_chapters_for_coursework(
        db: &DatabaseConnection,
        coursework_id: i32,
    ) -> Result<Vec<chapters::Model>, StoreError> {
        CourseworkService::require(db, coursework_id).await?;

        let chapters = chapters::Entity::find()
            .filter(chapters::Column::CourseworkId.eq(coursework_id))
            .order_by_asc(chapters::Column::Order)
            .order_by_asc(chapters::Column::Id)
            .all(db)
            .await?;
        Ok(chapters)
    }

    pub async fn update_chapter_status(
        db: &DatabaseConnection,
        chapter_id: i32,
        status: ChapterStatus,
    ) -> Result<chapters::Model, StoreError> {
        let chapter = Self::require(db, chapter_id).await?;
        let previous = chapter.updated_at;
        let mut active: chapters::ActiveModel = chapter.into();

        active.status = Set(status);
        active.updated_at = Set(fields::touched(previous));
        Ok(active.update(db).await?)
    }

    pub async fn update_chapter_details(
        db: &DatabaseConnection,
        chapter_id: i32,
        details: ChapterDetails,
    ) -> Result<chapters::Model, StoreError> {
        let title = details
            .title
            .map(|title| fields::required("title", title, SHORT_TEXT))
            .transpose()?;
        let content = details
            .content
            .map(|content| fields::optional("content", content, None))
            .transpose()?;

        let chapter = Self::require(db, chapter_id).await?;
        let previous = chapter.updated_at;
        let mut active: chapters::ActiveModel = chapter.into();

        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(content) = content {
            active.content = Set(content);
        }
        if let Some(order) = details.order {
            active.order = Set(order);
        }

        active.updated_at = Set(fields::touched(previous));
        Ok(active.update(db).await?)
    }

    /// Deletes a chapter and its reference links; the references stay
    pub async fn delete_chapter(
        db: &DatabaseConnection,
        chapter_id: i32,
    ) -> Result<DeleteSummary, StoreError> {
        let txn = db.begin().await?;
        Self::require(&txn, chapter_id).await?;

        let mut summary = DeleteSummary::default();
        cascade::delete_chapters(&txn, vec![chapter_id], &mut summary).await?;
        txn.commit().await?;

        info!("Deleted chapter {chapter_id}");
        Ok(summary)
    }

    /// Links a reference to a chapter; returns `false` if the link already existed
    pub async fn link_reference(
        db: &DatabaseConnection,
        chapter_id: i32,
        reference_id: i32,
    ) -> Result<bool, StoreError> {
        let txn = db.begin().await?;
        Self::require(&txn, chapter_id).await?;
        ReferenceService::require(&txn, reference_id).await?;

        let link = chapter_references::ActiveModel {
            chapter_id: Set(chapter_id),
            reference_id: Set(reference_id),
        };
        let inserted = chapter_references::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([
                    chapter_references::Column::ChapterId,
                    chapter_references::Column::ReferenceId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;
        txn.commit().await?;

        if inserted == 0 {
            debug!("Reference {reference_id} already linked to chapter {chapter_id}");
        }
        Ok(inserted > 0)
    }

    /// Removes the link row only; returns `false` if there was nothing to remove
    pub async fn unlink_reference(
        db: &DatabaseConnection,
        chapter_id: i32,
        reference_id: i32,
    ) -> Result<bool, StoreError> {
        let removed = chapter_references::Entity::delete_many()
            .filter(chapter_references::Column::ChapterId.eq(chapter_id))
            .filter(chapter_references::Column::ReferenceId.eq(reference_id))
            .exec(db)
            .await?
            .rows_affected;

        if removed == 0 {
            debug!("Reference {reference_id} was not linked to chapter {chapter_id}");
        }
        Ok(removed > 0)
    }

    /// Lists the references cited by a chapter, in creation order
    pub async fn list_references_for_chapter(
        db: &DatabaseConnection,
        chapter_id: i32,
    ) -> Result<Vec<references::Model>, StoreError> {
        let chapter = Self::require(db, chapter_id).await?;

        let references = chapter
            .find_related(references::Entity)
            .order_by_asc(references::Column::Id)
            .all(db)
            .await?;
        Ok(references)
    }

    pub(crate) async fn require<C>(db: &C, chapter_id: i32) -> Result<chapters::Model, StoreError>
    where
        C: ConnectionTrait,
    {
        chapters::Entity::find_by_id(chapter_id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("chapter", chapter_id))
    }
}
