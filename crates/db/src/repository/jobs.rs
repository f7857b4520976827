//! `"Jobs"` lookups.

use sqlx::PgPool;
use tracing::instrument;

use crate::{models::JobRow, query::query_by_field, DbError};

pub const JOBS_BY_TITLE: &str = r#"SELECT "id", "title" FROM "Jobs" WHERE "title"=$1"#;

/// Every job whose title equals `title` exactly.
#[instrument(skip(pool))]
pub async fn get_jobs_by_title(pool: &PgPool, title: &str) -> Result<Vec<JobRow>, DbError> {
    query_by_field(pool, JOBS_BY_TITLE, title).await
}
