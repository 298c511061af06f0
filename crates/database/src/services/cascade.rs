use crate::entities::{chapter_references, chapters, coursework_topics, courseworks};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use serde::Serialize;

/// Rows removed by a delete, including everything it cascaded to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    pub accounts: u64,
    pub courseworks: u64,
    pub chapters: u64,
    pub topics: u64,
    pub references: u64,
    pub topic_links: u64,
    pub reference_links: u64,
}

/// Deletes chapters together with their reference links
///
/// Must run inside the caller's transaction.
pub(crate) async fn delete_chapters<C>(
    txn: &C,
    chapter_ids: Vec<i32>,
    summary: &mut DeleteSummary,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if chapter_ids.is_empty() {
        return Ok(());
    }

    summary.reference_links += chapter_references::Entity::delete_many()
        .filter(chapter_references::Column::ChapterId.is_in(chapter_ids.clone()))
        .exec(txn)
        .await?
        .rows_affected;

    summary.chapters += chapters::Entity::delete_many()
        .filter(chapters::Column::Id.is_in(chapter_ids))
        .exec(txn)
        .await?
        .rows_affected;

    Ok(())
}

/// Deletes courseworks, their chapters, and every link row that points at either
///
/// Topics and references themselves are never touched.
pub(crate) async fn delete_courseworks<C>(
    txn: &C,
    coursework_ids: Vec<i32>,
    summary: &mut DeleteSummary,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if coursework_ids.is_empty() {
        return Ok(());
    }

    let chapter_ids: Vec<i32> = chapters::Entity::find()
        .select_only()
        .column(chapters::Column::Id)
        .filter(chapters::Column::CourseworkId.is_in(coursework_ids.clone()))
        .into_tuple()
        .all(txn)
        .await?;

    delete_chapters(txn, chapter_ids, summary).await?;

    summary.topic_links += coursework_topics::Entity::delete_many()
        .filter(coursework_topics::Column::CourseworkId.is_in(coursework_ids.clone()))
        .exec(txn)
        .await?
        .rows_affected;

    summary.courseworks += courseworks::Entity::delete_many()
        .filter(courseworks::Column::Id.is_in(coursework_ids))
        .exec(txn)
        .await?
        .rows_affected;

    Ok(())
}
