//! Mapping persistence errors onto GraphQL field errors.

use async_graphql::{Error, ErrorExtensions};

use db::DbError;

/// Convert a lookup failure into a GraphQL error with a `code` extension.
pub fn field_error(err: DbError) -> Error {
    let code = match &err {
        DbError::Connection(_) => "CONNECTION_FAILED",
        DbError::Query(_) => "QUERY_FAILED",
        DbError::Decode(_) => "ROW_DECODE_FAILED",
        DbError::InvalidTemplate(_) | DbError::InvalidDescriptor(_) => "INTERNAL",
    };
    let message = match std::error::Error::source(&err) {
        Some(cause) => format!("{err}: {cause}"),
        None => err.to_string(),
    };
    Error::new(message).extend_with(|_, ext| ext.set("code", code))
}
