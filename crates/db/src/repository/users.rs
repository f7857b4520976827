//! `"Users"` lookups.

use sqlx::PgPool;
use tracing::instrument;

use crate::{models::UserRow, query::query_by_field, DbError};

pub const USERS_BY_FIRST_NAME: &str =
    r#"SELECT "id", "firstName", "lastName" FROM "Users" WHERE "firstName"=$1"#;

/// Every user whose first name equals `first_name` exactly.
#[instrument(skip(pool))]
pub async fn get_users_by_name(pool: &PgPool, first_name: &str) -> Result<Vec<UserRow>, DbError> {
    query_by_field(pool, USERS_BY_FIRST_NAME, first_name).await
}
