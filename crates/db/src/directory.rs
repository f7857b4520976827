//! The `Directory` trait — the lookups callers depend on.
//!
//! Resolvers and the CLI take a `&dyn Directory` instead of a global
//! handle, so tests can swap in [`MemoryDirectory`](crate::MemoryDirectory).

use async_trait::async_trait;

use crate::{
    models::{JobRow, UserRow},
    pool::Db,
    repository::{jobs, users},
    DbError,
};

#[async_trait]
pub trait Directory: Send + Sync {
    /// Users whose first name matches exactly. Empty when none match.
    async fn users_by_first_name(&self, first_name: &str) -> Result<Vec<UserRow>, DbError>;

    /// Jobs whose title matches exactly. Empty when none match.
    async fn jobs_by_title(&self, title: &str) -> Result<Vec<JobRow>, DbError>;
}

#[async_trait]
impl Directory for Db {
    async fn users_by_first_name(&self, first_name: &str) -> Result<Vec<UserRow>, DbError> {
        users::get_users_by_name(self.pool(), first_name).await
    }

    async fn jobs_by_title(&self, title: &str) -> Result<Vec<JobRow>, DbError> {
        jobs::get_jobs_by_title(self.pool(), title).await
    }
}
