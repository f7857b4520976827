//! Typed query execution.
//!
//! Both lookups share one shape: a SQL template with a single positional
//! placeholder, one bound string, and a record type to decode every row
//! into.  [`query_by_field`] is that shape.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};

use crate::DbError;

/// Run `sql_template` with `param` bound to `$1` and decode each row into `T`.
///
/// The template must reference exactly one placeholder, `$1` (it may appear
/// more than once).  `param` is always bound, never spliced into the SQL.
///
/// Rows come back in the order the database returns them; each is decoded
/// into a fresh `T`.  No matching rows is `Ok(vec![])`.  Failures are
/// logged and returned, so callers can tell "no match" from "query failed".
pub async fn query_by_field<T>(
    pool: &PgPool,
    sql_template: &str,
    param: &str,
) -> Result<Vec<T>, DbError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    validate_template(sql_template)?;

    let rows = sqlx::query_as::<_, T>(sql_template)
        .bind(param)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(sql = sql_template, error = %e, "Query failed");
            DbError::from_query(e)
        })?;

    debug!(sql = sql_template, rows = rows.len(), "Query returned");
    Ok(rows)
}

/// Check that the only positional placeholder in `sql` is `$1`.
///
/// `'...'` string literals and `"..."` quoted identifiers are skipped, with
/// a doubled quote inside either one read as an escaped quote.
pub fn validate_template(sql: &str) -> Result<(), DbError> {
    let mut found_first = false;
    let bytes = sql.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"') => i = skip_quoted(bytes, i, quote),
            b'$' => {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start {
                    match &sql[start..end] {
                        "1" => found_first = true,
                        other => {
                            return Err(DbError::InvalidTemplate(format!(
                                "unexpected placeholder ${other}; only $1 is bound"
                            )));
                        }
                    }
                }
                i = end;
            }
            _ => i += 1,
        }
    }

    if found_first {
        Ok(())
    } else {
        Err(DbError::InvalidTemplate("missing $1 placeholder".into()))
    }
}

/// Index just past the quoted section opening at `open`.
///
/// An unterminated section runs to the end of the input.
fn skip_quoted(bytes: &[u8], open: usize, quote: u8) -> usize {
    let mut i = open + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}
