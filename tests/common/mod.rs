// Common test utilities for integration tests

use identity_core::config::{init_database, migrate_database};
use identity_core::services::CredentialCodec;
use identity_core::stores::{IdentityStore, PermissionStore};
use sea_orm::DatabaseConnection;

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = init_database("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    migrate_database(&db)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates a test database plus both stores with the default codec
pub async fn setup_stores() -> (DatabaseConnection, IdentityStore, PermissionStore) {
    let db = setup_test_db().await;

    let identities = IdentityStore::new(db.clone(), CredentialCodec::default());
    let permissions = PermissionStore::new(db.clone());

    (db, identities, permissions)
}
