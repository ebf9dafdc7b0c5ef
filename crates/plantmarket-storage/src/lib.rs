// Postgres storage layer with sqlx
//
// This crate owns the schema (embedded migrations), the row models, the
// `Database` repository, and password hashing for the two account tables.

pub mod models;
pub mod password;
pub mod repositories;

pub use models::*;
pub use password::{hash_password, verify_password};
pub use repositories::Database;
