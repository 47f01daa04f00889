// Types layer - database entities and the domain model

pub mod db;
pub mod identity;

pub use identity::{Identity, ADMIN_PERMISSION};
