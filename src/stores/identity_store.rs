use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::errors::{DatabaseError, StoreError};
use crate::services::CredentialCodec;
use crate::types::db::{identity, permission};
use crate::types::Identity;

/// Upper bound on identity handles, matching the column declaration.
pub const MAX_NAME_LEN: usize = 16;

/// IdentityStore owns identity records: creation, lookups, credential
/// changes, and cascading deletion.
///
/// The connection and codec are injected; the store holds no global state.
pub struct IdentityStore {
    db: DatabaseConnection,
    codec: CredentialCodec,
}

impl IdentityStore {
    pub fn new(db: DatabaseConnection, codec: CredentialCodec) -> Self {
        Self { db, codec }
    }

    /// Register a new identity with an initial password.
    ///
    /// The plaintext is derived into a credential before anything is written;
    /// it is never persisted or logged. Name uniqueness is enforced with a
    /// pre-check and again at the UNIQUE constraint.
    pub async fn create(&self, name: &str, password: &str) -> Result<Identity, StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidName {
                reason: "name must not be empty".to_string(),
            });
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(StoreError::InvalidName {
                reason: format!("name longer than {MAX_NAME_LEN} characters"),
            });
        }

        let existing = identity::Entity::find()
            .filter(identity::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_identity_by_name", e))?;
        if existing.is_some() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let credential = self.codec.derive(password)?;
        let now = Utc::now().timestamp();

        let new_identity = identity::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            credential: Set(Some(credential)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = new_identity.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                StoreError::DuplicateName(name.to_string())
            } else {
                StoreError::database("insert_identity", e)
            }
        })?;

        tracing::debug!(name = %inserted.name, "created identity");

        Ok(Identity::from_models(inserted, Vec::new()))
    }

    /// Every stored identity, hydrated with its permission names.
    pub async fn all(&self) -> Result<Vec<Identity>, StoreError> {
        let rows = identity::Entity::find()
            .find_with_related(permission::Entity)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_identities", e))?;

        Ok(rows
            .into_iter()
            .map(|(model, permissions)| Identity::from_models(model, permissions))
            .collect())
    }

    /// Every stored identity that does not hold the admin permission.
    ///
    /// Admin status is derived from permission membership, not a stored flag.
    pub async fn all_ordinary_users(&self) -> Result<Vec<Identity>, StoreError> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|identity| !identity.is_admin())
            .collect())
    }

    /// Single lookup by primary identifier. Absent is `Ok(None)`.
    pub async fn by_id(&self, id: &str) -> Result<Option<Identity>, StoreError> {
        let rows = identity::Entity::find_by_id(id)
            .find_with_related(permission::Entity)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("find_identity_by_id", e))?;

        Ok(rows
            .into_iter()
            .next()
            .map(|(model, permissions)| Identity::from_models(model, permissions)))
    }

    /// Single lookup by unique handle. Comparison is against the exact
    /// character content of the stored name, case included.
    pub async fn by_name(&self, name: &str) -> Result<Option<Identity>, StoreError> {
        let rows = identity::Entity::find()
            .filter(identity::Column::Name.eq(name))
            .find_with_related(permission::Entity)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("find_identity_by_name", e))?;

        Ok(rows
            .into_iter()
            .next()
            .map(|(model, permissions)| Identity::from_models(model, permissions)))
    }

    /// Re-derive the identity's credential from `plaintext` and persist it.
    ///
    /// Goes through [`Identity::set_password`], the only path that can touch
    /// the credential slot.
    pub async fn set_password(
        &self,
        identity: &mut Identity,
        plaintext: &str,
    ) -> Result<(), StoreError> {
        identity.set_password(&self.codec, plaintext)?;

        let update = identity::ActiveModel {
            id: Set(identity.id().to_string()),
            credential: Set(identity.credential().map(str::to_string)),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        update.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreError::IdentityNotFound(identity.id().to_string()),
            other => StoreError::database("update_credential", other),
        })?;

        tracing::debug!(name = %identity.name(), "credential updated");

        Ok(())
    }

    /// Delete an identity and all of its permissions in one transaction.
    ///
    /// No permission row survives its owning identity.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| StoreError::Database(DatabaseError::TransactionBegin { source }))?;

        permission::Entity::delete_many()
            .filter(permission::Column::IdentityId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| StoreError::database("delete_identity_permissions", e))?;

        let result = identity::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| StoreError::database("delete_identity", e))?;

        if result.rows_affected == 0 {
            // Dropping the transaction rolls the permission delete back
            return Err(StoreError::IdentityNotFound(id.to_string()));
        }

        txn.commit()
            .await
            .map_err(|source| StoreError::Database(DatabaseError::TransactionCommit { source }))?;

        tracing::debug!(identity_id = %id, "deleted identity and its permissions");

        Ok(())
    }
}
