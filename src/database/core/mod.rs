//! Core database infrastructure
//!
//! - `DatabaseConn`: SQLite connection wrapper with the shared pragmas
//! - `SchemaManager`: schema initialization, status and reset
//! - `SchemaStatus`: schema state enumeration

mod connection;
mod schema;

pub use connection::DatabaseConn;
pub use schema::{SchemaDefinitions, SchemaManager, SchemaStatus, SCHEMA_VERSION};
