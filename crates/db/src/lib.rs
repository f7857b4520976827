//! `db` crate — pure persistence layer.
//!
//! Provides the connection descriptor, a liveness-checked connection handle,
//! typed row structs and the lookup functions for the `Users` and `Jobs`
//! tables.  No business logic lives here.

pub mod conn;
pub mod directory;
pub mod error;
pub mod memory;
pub mod models;
pub mod pool;
pub mod query;
pub mod repository;

pub use conn::{conn_string, ConnConfig};
pub use directory::Directory;
pub use error::DbError;
pub use memory::MemoryDirectory;
pub use models::{JobRow, UserRow};
pub use pool::Db;
pub use query::query_by_field;


#[cfg(test)]
pub(crate) mod test_support {
    use crate::ConnConfig;

    /// Connection settings for the ignored live-database tests.
    pub fn config_from_env() -> ConnConfig {
        let var = |name: &str, default: &str| std::env::var(name).unwrap_or_else(|_| default.to_string());
        ConnConfig::new(
            var("PGHOST", "localhost"),
            var("PGPORT", "5432").parse().expect("PGPORT must be a number"),
            var("PGUSER", "postgres"),
            var("PGDATABASE", "postgres"),
            var("PGPASSWORD", ""),
        )
    }
}
