use crate::{
    entities::{chapter_references, chapters, references},
    error::StoreError,
    services::{
        cascade::DeleteSummary,
        fields::{self, LONG_TEXT, SHORT_TEXT, TAG_TEXT},
    },
};
use log::info;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

/// Fields accepted when a reference is recorded
#[derive(Debug, Clone, Default)]
pub struct NewReference {
    pub title: String,
    /// Free-form category such as book, article, or website
    pub reference_type: String,
    pub authors: Option<String>,
    pub source_url: Option<String>,
    pub publication_year: Option<i32>,
    pub citation_format: Option<String>,
    pub notes: Option<String>,
}

/// Editable reference fields; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ReferenceDetails {
    pub title: Option<String>,
    pub reference_type: Option<String>,
    pub authors: Option<Option<String>>,
    pub source_url: Option<Option<String>>,
    pub publication_year: Option<Option<i32>>,
    pub citation_format: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

pub struct ReferenceService;

impl ReferenceService {
    pub async fn create_reference(
        db: &DatabaseConnection,
        new_reference: NewReference,
    ) -> Result<references::Model, StoreError> {
        let title = fields::required("title", new_reference.title, SHORT_TEXT)?;
        let reference_type =
            fields::required("reference_type", new_reference.reference_type, TAG_TEXT)?;
        let authors = fields::optional("authors", new_reference.authors, Some(LONG_TEXT))?;
        let source_url = fields::optional("source_url", new_reference.source_url, Some(LONG_TEXT))?;
        let citation_format =
            fields::optional("citation_format", new_reference.citation_format, None)?;
        let notes = fields::optional("notes", new_reference.notes, None)?;
        let now = fields::now();

        let reference = references::ActiveModel {
            id: NotSet,
            title: Set(title),
            authors: Set(authors),
            source_url: Set(source_url),
            publication_year: Set(new_reference.publication_year),
            reference_type: Set(reference_type),
            citation_format: Set(citation_format),
            notes: Set(notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        info!(
            "Created {} reference {} '{}'",
            reference.reference_type, reference.id, reference.title
        );
        Ok(reference)
    }

    pub async fn get_reference(
        db: &DatabaseConnection,
        reference_id: i32,
    ) -> Result<references::Model, StoreError> {
        Self::require(db, reference_id).await
    }

    pub async fn update_reference(
        db: &DatabaseConnection,
        reference_id: i32,
        details: ReferenceDetails,
    ) -> Result<references::Model, StoreError> {
        let title = details
            .title
            .map(|title| fields::required("title", title, SHORT_TEXT))
            .transpose()?;
        let reference_type = details
            .reference_type
            .map(|kind| fields::required("reference_type", kind, TAG_TEXT))
            .transpose()?;
        let authors = details
            .authors
            .map(|authors| fields::optional("authors", authors, Some(LONG_TEXT)))
            .transpose()?;
        let source_url = details
            .source_url
            .map(|url| fields::optional("source_url", url, Some(LONG_TEXT)))
            .transpose()?;
        let citation_format = details
            .citation_format
            .map(|format| fields::optional("citation_format", format, None))
            .transpose()?;
        let notes = details
            .notes
            .map(|notes| fields::optional("notes", notes, None))
            .transpose()?;

        let reference = Self::require(db, reference_id).await?;
        let previous = reference.updated_at;
        let mut active: references::ActiveModel = reference.into();

        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(reference_type) = reference_type {
            active.reference_type = Set(reference_type);
        }
        if let Some(authors) = authors {
            active.authors = Set(authors);
        }
        if let Some(source_url) = source_url {
            active.source_url = Set(source_url);
        }
        if let Some(publication_year) = details.publication_year {
            active.publication_year = Set(publication_year);
        }
        if let Some(citation_format) = citation_format {
            active.citation_format = Set(citation_format);
        }
        if let Some(notes) = notes {
            active.notes = Set(notes);
        }

        active.updated_at = Set(fields::touched(previous));
        Ok(active.update(db).await?)
    }

    /// Lists the chapters citing a reference, in creation order
    pub async fn list_chapters_for_reference(
        db: &DatabaseConnection,
        reference_id: i32,
    ) -> Result<Vec<chapters::Model>, StoreError> {
        let reference = Self::require(db, reference_id).await?;

        let chapters = reference
            .find_related(chapters::Entity)
            .order_by_asc(chapters::Column::Id)
            .all(db)
            .await?;
        Ok(chapters)
    }

    /// Deletes a reference and its links; citing chapters are left alone
    pub async fn delete_reference(
        db: &DatabaseConnection,
        reference_id: i32,
    ) -> Result<DeleteSummary, StoreError> {
        let txn = db.begin().await?;
        Self::require(&txn, reference_id).await?;

        let reference_links = chapter_references::Entity::delete_many()
            .filter(chapter_references::Column::ReferenceId.eq(reference_id))
            .exec(&txn)
            .await?
            .rows_affected;
        let references = references::Entity::delete_by_id(reference_id)
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;

        info!("Deleted reference {reference_id}, unlinked from {reference_links} chapters");
        Ok(DeleteSummary {
            references,
            reference_links,
            ..DeleteSummary::default()
        })
    }

    pub(crate) async fn require<C>(
        db: &C,
        reference_id: i32,
    ) -> Result<references::Model, StoreError>
    where
        C: ConnectionTrait,
    {
        references::Entity::find_by_id(reference_id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("reference", reference_id))
    }
}
