//! `MemoryDirectory` — an in-process stand-in for the database.
//!
//! Rows are kept in insertion order, which plays the part of the database's
//! row return order.  Every lookup is recorded so tests can assert on what
//! was asked.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    models::{JobRow, UserRow},
    Directory, DbError,
};

/// A recorded lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    UsersByFirstName(String),
    JobsByTitle(String),
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRow>,
    jobs: Vec<JobRow>,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryDirectory {
    tables: Arc<Mutex<Tables>>,
    /// When set, every lookup fails with `DbError::Query` carrying this text.
    failure: Arc<Mutex<Option<String>>>,
    /// All lookups seen (in call order).
    pub calls: Arc<Mutex<Vec<Lookup>>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(self, users: impl IntoIterator<Item = UserRow>) -> Self {
        lock(&self.tables).users.extend(users);
        self
    }

    pub fn with_jobs(self, jobs: impl IntoIterator<Item = JobRow>) -> Self {
        lock(&self.tables).jobs.extend(jobs);
        self
    }

    pub fn insert_user(&self, user: UserRow) {
        lock(&self.tables).users.push(user);
    }

    pub fn insert_job(&self, job: JobRow) {
        lock(&self.tables).jobs.push(job);
    }

    /// Make every following lookup fail until [`clear_failure`](Self::clear_failure).
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    pub fn clear_failure(&self) {
        *lock(&self.failure) = None;
    }

    /// Number of lookups served so far.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn record(&self, lookup: Lookup) -> Result<(), DbError> {
        lock(&self.calls).push(lookup);
        match lock(&self.failure).as_ref() {
            Some(msg) => Err(DbError::Query(sqlx::Error::Protocol(msg.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn users_by_first_name(&self, first_name: &str) -> Result<Vec<UserRow>, DbError> {
        self.record(Lookup::UsersByFirstName(first_name.to_string()))?;
        Ok(lock(&self.tables)
            .users
            .iter()
            .filter(|u| u.first_name == first_name)
            .cloned()
            .collect())
    }

    async fn jobs_by_title(&self, title: &str) -> Result<Vec<JobRow>, DbError> {
        self.record(Lookup::JobsByTitle(title.to_string()))?;
        Ok(lock(&self.tables)
            .jobs
            .iter()
            .filter(|j| j.title == title)
            .cloned()
            .collect())
    }
}

// Poisoning is ignored; the tables stay usable.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
