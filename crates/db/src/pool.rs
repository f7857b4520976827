//! Postgres connection handle.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool};
use tracing::{error, info, warn};

use crate::{ConnConfig, DbError};

/// Ceiling on driver-managed connections. Kept low; this is lookup glue.
const MAX_CONNECTIONS: u32 = 5;

/// How long a lookup waits for a pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// A live, ping-verified database handle.
///
/// Only constructed by [`Db::open`] / [`Db::connect`], so holders always
/// have a connection that answered a liveness probe at least once.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    /// Open a connection from a descriptor string and verify it with a ping.
    pub async fn open(descriptor: &str) -> Result<Self, DbError> {
        let config: ConnConfig = descriptor.parse()?;
        Self::connect(&config).await
    }

    /// Open a connection from parsed settings and verify it with a ping.
    ///
    /// Exactly one connection attempt is made; its failure is returned with
    /// the driver's cause.  The pool used by later lookups is built only
    /// after that connection answered.
    pub async fn connect(config: &ConnConfig) -> Result<Self, DbError> {
        info!(
            host = %config.host,
            port = config.port,
            dbname = %config.dbname,
            "Connecting to database"
        );

        let options = config.connect_options();

        // Single direct attempt; its error is returned unchanged.
        let mut probe = PgConnection::connect_with(&options).await.map_err(|e| {
            error!(error = %e, "Failed to open database connection");
            DbError::Connection(e)
        })?;

        if let Err(e) = probe.ping().await {
            error!(error = %e, "Database liveness check failed");
            return Err(DbError::Connection(e));
        }

        if let Err(e) = probe.close().await {
            warn!(error = %e, "Closing the verification connection failed");
        }

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);

        info!("Database connection verified");
        Ok(Self { pool })
    }

    /// The underlying driver handle.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Re-run the liveness probe on demand.
    pub async fn ping(&self) -> Result<(), DbError> {
        ping(&self.pool).await.map_err(DbError::Connection)
    }
}

async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    conn.ping().await
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[tokio::test]
    async fn malformed_descriptor_is_rejected_before_connecting() {
        let err = Db::open("host=localhost nonsense").await.unwrap_err();
        assert!(matches!(err, DbError::InvalidDescriptor(_)));
    }

    #[tokio::test]
    async fn unreachable_target_fails_fast_with_the_refusal() {
        // Port 1 on loopback is never a Postgres server.
        let cfg = ConnConfig::new("127.0.0.1", 1, "postgres", "postgres", "");

        let started = Instant::now();
        let err = Db::connect(&cfg).await.unwrap_err();
        let elapsed = started.elapsed();

        match err {
            DbError::Connection(sqlx::Error::Io(io)) => {
                assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
            }
            other => panic!("expected a refused connection, got {other:?}"),
        }
        assert!(
            elapsed < ACQUIRE_TIMEOUT / 2,
            "connect took {elapsed:?}; it should not wait on the pool"
        );
    }

    // Integration tests require a real database
    // Run with: PGHOST=... PGUSER=... PGDATABASE=... cargo test -p db -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn open_returns_a_usable_connection() {
        let db = Db::connect(&crate::test_support::config_from_env())
            .await
            .expect("connection failed");

        db.ping().await.expect("ping failed");

        let one: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(db.pool())
            .await
            .expect("query failed");
        assert_eq!(one.0, 1);
    }
}
