use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::errors::StoreError;

/// Initialize the identity database connection
///
/// Connects to the database and returns the connection.
/// Does NOT run migrations - call migrate_database() separately.
pub async fn init_database(database_url: &str) -> Result<DatabaseConnection, StoreError> {
    let db = Database::connect(database_url)
        .await
        .map_err(|e| StoreError::database("connect_database", e))?;

    tracing::debug!("Connected to identity database: {}", database_url);

    Ok(db)
}

/// Run all pending migrations on the identity database
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), StoreError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| StoreError::database("run_migrations", e))?;

    tracing::debug!("Identity database migrations completed");

    Ok(())
}
