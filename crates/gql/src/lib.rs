//! `gql` crate — GraphQL object types for the lookup records.
//!
//! Only the types live here; wiring them into a query root is up to the
//! embedding service.  [`field_error`] turns a lookup failure into a
//! field-level GraphQL error so a failed query never looks like an empty
//! result.

pub mod error;
pub mod types;

pub use error::field_error;
pub use types::{Job, User};
