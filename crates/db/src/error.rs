//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// Opening the connection or the liveness probe failed.
    #[error("connection error")]
    Connection(#[source] sqlx::Error),

    /// Preparing or executing a statement failed.
    #[error("query error")]
    Query(#[source] sqlx::Error),

    /// A returned row did not match the target record shape.
    #[error("row decode error")]
    Decode(#[source] sqlx::Error),

    #[error("invalid query template: {0}")]
    InvalidTemplate(String),

    #[error("invalid connection descriptor: {0}")]
    InvalidDescriptor(String),
}

impl DbError {
    /// Classify a driver error raised while running a query.
    pub(crate) fn from_query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_) => Self::Decode(err),
            other => Self::Query(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_are_classified_as_decode() {
        let err = DbError::from_query(sqlx::Error::ColumnNotFound("firstName".into()));
        assert!(matches!(err, DbError::Decode(_)));
    }

    #[test]
    fn driver_cause_is_a_source_not_part_of_the_message() {
        use std::error::Error as _;

        let err = DbError::Query(sqlx::Error::Protocol("connection reset".into()));
        assert_eq!(err.to_string(), "query error");
        let source = err.source().expect("driver cause kept as source");
        assert!(source.to_string().contains("connection reset"));
    }

    #[test]
    fn other_failures_are_classified_as_query() {
        let err = DbError::from_query(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Query(_)));
    }
}
