use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::errors::StoreError;
use crate::types::db::{identity, permission};

/// PermissionStore manages the named grants attached to identities.
///
/// A permission always belongs to an existing identity; granting against an
/// unknown owner is refused rather than left to the foreign key.
pub struct PermissionStore {
    db: DatabaseConnection,
}

impl PermissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach a named grant to an identity.
    pub async fn grant(
        &self,
        identity_id: &str,
        name: &str,
    ) -> Result<permission::Model, StoreError> {
        let owner = identity::Entity::find_by_id(identity_id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_identity", e))?;
        if owner.is_none() {
            return Err(StoreError::IdentityNotFound(identity_id.to_string()));
        }

        if self.exists(identity_id, name).await? {
            return Err(StoreError::PermissionAlreadyGranted {
                identity_id: identity_id.to_string(),
                name: name.to_string(),
            });
        }

        let new_permission = permission::ActiveModel {
            id: NotSet,
            identity_id: Set(identity_id.to_string()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        let inserted = new_permission.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                StoreError::PermissionAlreadyGranted {
                    identity_id: identity_id.to_string(),
                    name: name.to_string(),
                }
            } else {
                StoreError::database("insert_permission", e)
            }
        })?;

        tracing::debug!(identity_id = %identity_id, permission = %name, "granted permission");

        Ok(inserted)
    }

    /// Remove a named grant from an identity.
    pub async fn revoke(&self, identity_id: &str, name: &str) -> Result<(), StoreError> {
        let result = permission::Entity::delete_many()
            .filter(permission::Column::IdentityId.eq(identity_id))
            .filter(permission::Column::Name.eq(name))
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::database("delete_permission", e))?;

        if result.rows_affected == 0 {
            return Err(StoreError::PermissionNotGranted {
                identity_id: identity_id.to_string(),
                name: name.to_string(),
            });
        }

        tracing::debug!(identity_id = %identity_id, permission = %name, "revoked permission");

        Ok(())
    }

    /// Single lookup by permission id. Absent is `Ok(None)`.
    pub async fn by_id(&self, id: i32) -> Result<Option<permission::Model>, StoreError> {
        permission::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_permission_by_id", e))
    }

    /// Direct membership test, without loading the identity's full
    /// permission collection.
    pub async fn exists(&self, identity_id: &str, name: &str) -> Result<bool, StoreError> {
        let count = permission::Entity::find()
            .filter(permission::Column::IdentityId.eq(identity_id))
            .filter(permission::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(|e| StoreError::database("count_permissions", e))?;

        Ok(count > 0)
    }
}
