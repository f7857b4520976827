//! Object types exposed at the GraphQL boundary.

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use db::{JobRow, UserRow};

/// A user, as returned by the first-name lookup.
///
/// `lastName` is a `String`, the same as the `"lastName"` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

/// A job, as returned by the title lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct Job {
    pub id: i32,
    pub title: String,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self { id: row.id, title: row.title }
    }
}
