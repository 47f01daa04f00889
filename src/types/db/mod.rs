// Database entities - SeaORM models

pub mod identity;
pub mod permission;
