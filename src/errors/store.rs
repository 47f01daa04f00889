use thiserror::Error;

use crate::errors::{CredentialError, DatabaseError};

/// Error type for identity and permission store operations.
///
/// Lookup misses are not represented here: `by_id`/`by_name` return
/// `Ok(None)` so callers can branch without control flow through errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Identity name already taken: {0}")]
    DuplicateName(String),

    #[error("Invalid identity name: {reason}")]
    InvalidName { reason: String },

    #[error("Identity not found: {0}")]
    IdentityNotFound(String),

    #[error("Permission {name:?} already granted to identity {identity_id}")]
    PermissionAlreadyGranted { identity_id: String, name: String },

    #[error("Permission {name:?} not granted to identity {identity_id}")]
    PermissionNotGranted { identity_id: String, name: String },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl StoreError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> StoreError {
        StoreError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }
}
