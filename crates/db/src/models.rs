//! Row structs that map 1-to-1 onto database tables.
//!
//! Column names in the schema are quoted camelCase (`"firstName"`), so each
//! field carries an explicit `sqlx(rename)`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `"Users"` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: i32,
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    #[sqlx(rename = "lastName")]
    pub last_name: String,
}

/// A row of the `"Jobs"` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i32,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn user_row_serialises_with_camel_case_names() {
        let row = UserRow { id: 1, first_name: "Ana".into(), last_name: "Lee".into() };
        assert_eq!(
            serde_json::to_value(&row).expect("serialise"),
            json!({ "id": 1, "firstName": "Ana", "lastName": "Lee" })
        );
    }

    #[test]
    fn job_row_serialises_as_is() {
        let row = JobRow { id: 10, title: "Engineer".into() };
        assert_eq!(
            serde_json::to_value(&row).expect("serialise"),
            json!({ "id": 10, "title": "Engineer" })
        );
    }
}
