//! Repository functions — one function per database lookup.
//!
//! Every function takes a `&PgPool` and returns a `Result<Vec<T>, DbError>`.
//! No business logic, no domain types — pure SQL.

pub mod jobs;
pub mod users;
