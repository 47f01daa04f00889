// Errors layer - error type definitions

pub mod credential;
pub mod database;
pub mod store;

pub use credential::CredentialError;
pub use database::DatabaseError;
pub use store::StoreError;
