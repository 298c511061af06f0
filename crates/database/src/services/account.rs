use crate::{
    entities::{accounts, courseworks},
    error::StoreError,
    services::{
        cascade::{self, DeleteSummary},
        fields::{self, SHORT_TEXT},
    },
};
use log::{info, warn};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};

/// Fields accepted when an account is first seen
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub external_id: i64,
    pub handle: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Profile changes; `None` keeps the stored value, a blank string clears it
#[derive(Debug, Clone, Default)]
pub struct AccountProfile {
    pub handle: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

pub struct AccountService;

impl AccountService {
    /// Creates an account; fails with `Conflict` if the external id, handle, or email is taken
    pub async fn create_account(
        db: &DatabaseConnection,
        new_account: NewAccount,
    ) -> Result<accounts::Model, StoreError> {
        let handle = fields::optional("handle", new_account.handle, Some(SHORT_TEXT))?;
        let first_name = fields::optional("first_name", new_account.first_name, Some(SHORT_TEXT))?;
        let last_name = fields::optional("last_name", new_account.last_name, Some(SHORT_TEXT))?;
        let email = fields::optional("email", new_account.email, Some(SHORT_TEXT))?;

        let now = fields::now();

        // Uniqueness is left to the engine so that concurrent creators cannot both win
        let account = accounts::ActiveModel {
            id: NotSet,
            external_id: Set(new_account.external_id),
            handle: Set(handle),
            first_name: Set(first_name),
            last_name: Set(last_name),
            email: Set(email),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .map_err(|e| {
            let err = StoreError::from(e);
            if err.is_conflict() {
                warn!(
                    "Account for external id {} conflicts with an existing one",
                    new_account.external_id
                );
            }
            err
        })?;

        info!(
            "Created account {} for external id {}",
            account.id, account.external_id
        );
        Ok(account)
    }

    pub async fn get_account(
        db: &DatabaseConnection,
        account_id: i32,
    ) -> Result<accounts::Model, StoreError> {
        Self::require(db, account_id).await
    }

    pub async fn find_account_by_external_id(
        db: &DatabaseConnection,
        external_id: i64,
    ) -> Result<Option<accounts::Model>, StoreError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::ExternalId.eq(external_id))
            .one(db)
            .await?;
        Ok(account)
    }

    /// Returns the account for `external_id`, creating it on first contact
    ///
    /// A concurrent creator winning the race is resolved by reading its row back.
    pub async fn get_or_create_account(
        db: &DatabaseConnection,
        new_account: NewAccount,
    ) -> Result<accounts::Model, StoreError> {
        let external_id = new_account.external_id;
        if let Some(account) = Self::find_account_by_external_id(db, external_id).await? {
            return Ok(account);
        }

        match Self::create_account(db, new_account).await {
            Err(err) if err.is_conflict() => Self::find_account_by_external_id(db, external_id)
                .await?
                .ok_or(err),
            result => result,
        }
    }

    pub async fn update_account_profile(
        db: &DatabaseConnection,
        account_id: i32,
        profile: AccountProfile,
    ) -> Result<accounts::Model, StoreError> {
        let account = Self::require(db, account_id).await?;
        let previous = account.updated_at;
        let mut active: accounts::ActiveModel = account.into();

        if let Some(handle) = profile.handle {
            active.handle = Set(fields::optional("handle", Some(handle), Some(SHORT_TEXT))?);
        }
        if let Some(first_name) = profile.first_name {
            active.first_name =
                Set(fields::optional("first_name", Some(first_name), Some(SHORT_TEXT))?);
        }
        if let Some(last_name) = profile.last_name {
            active.last_name =
                Set(fields::optional("last_name", Some(last_name), Some(SHORT_TEXT))?);
        }
        if let Some(email) = profile.email {
            active.email = Set(fields::optional("email", Some(email), Some(SHORT_TEXT))?);
        }

        active.updated_at = Set(fields::touched(previous));
        Ok(active.update(db).await?)
    }

    pub async fn set_account_active(
        db: &DatabaseConnection,
        account_id: i32,
        is_active: bool,
    ) -> Result<accounts::Model, StoreError> {
        let account = Self::require(db, account_id).await?;
        let previous = account.updated_at;
        let mut active: accounts::ActiveModel = account.into();

        active.is_active = Set(is_active);
        active.updated_at = Set(fields::touched(previous));
        Ok(active.update(db).await?)
    }

    /// Deletes an account with all of its courseworks and their chapters
    ///
    /// Topics and references linked to the deleted rows stay in place; only the
    /// link rows go.
    pub async fn delete_account(
        db: &DatabaseConnection,
        account_id: i32,
    ) -> Result<DeleteSummary, StoreError> {
        let txn = db.begin().await?;
        Self::require(&txn, account_id).await?;

        let coursework_ids: Vec<i32> = courseworks::Entity::find()
            .select_only()
            .column(courseworks::Column::Id)
            .filter(courseworks::Column::AccountId.eq(account_id))
            .into_tuple()
            .all(&txn)
            .await?;

        let mut summary = DeleteSummary::default();
        cascade::delete_courseworks(&txn, coursework_ids, &mut summary).await?;

        summary.accounts = accounts::Entity::delete_by_id(account_id)
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;

        info!(
            "Deleted account {account_id} with {} courseworks and {} chapters",
            summary.courseworks, summary.chapters
        );
        Ok(summary)
    }

    pub(crate) async fn require<C>(db: &C, account_id: i32) -> Result<accounts::Model, StoreError>
    where
        C: ConnectionTrait,
    {
        accounts::Entity::find_by_id(account_id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("account", account_id))
    }
}
