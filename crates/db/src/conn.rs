//! Connection descriptor.
//!
//! The descriptor is a libpq-style `key=value` string:
//!
//! ```text
//! host=<H> password=<P> port=<PORT> user=<U> dbname=<DB> sslmode=require
//! ```
//!
//! TLS is always required and the password slot is always present, even
//! when it is empty.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::DbError;

/// Default Postgres port used when a descriptor omits `port`.
pub const DEFAULT_PORT: u16 = 5432;

/// Everything needed to reach and authenticate to the database.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub dbname: String,
    /// May be empty, but is never omitted from the descriptor.
    #[serde(default)]
    pub password: String,
}

impl ConnConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        dbname: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            dbname: dbname.into(),
            password: password.into(),
        }
    }

    /// Render the descriptor string for this config.
    pub fn conn_string(&self) -> String {
        conn_string(&self.host, self.port, &self.user, &self.dbname, &self.password)
    }

    /// Descriptor with the password replaced by `***`, safe for logs.
    pub fn redacted(&self) -> String {
        let mask = if self.password.is_empty() { "" } else { "***" };
        conn_string(&self.host, self.port, &self.user, &self.dbname, mask)
    }

    /// Driver connect options, always with `sslmode=require`.
    pub fn connect_options(&self) -> PgConnectOptions {
        let opts = PgConnectOptions::new_without_pgpass()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.dbname)
            .ssl_mode(PgSslMode::Require);

        if self.password.is_empty() {
            opts
        } else {
            opts.password(&self.password)
        }
    }
}

impl fmt::Debug for ConnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("dbname", &self.dbname)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl FromStr for ConnConfig {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut host = None;
        let mut port = DEFAULT_PORT;
        let mut user = None;
        let mut dbname = None;
        let mut password = String::new();

        for pair in s.split_whitespace() {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| DbError::InvalidDescriptor(format!("expected key=value, got '{pair}'")))?;

            match key {
                "host" => host = Some(value.to_string()),
                "password" => password = value.to_string(),
                "port" => {
                    port = value
                        .parse()
                        .map_err(|_| DbError::InvalidDescriptor(format!("invalid port '{value}'")))?;
                }
                "user" => user = Some(value.to_string()),
                "dbname" => dbname = Some(value.to_string()),
                "sslmode" if value == "require" => {}
                "sslmode" => {
                    return Err(DbError::InvalidDescriptor(format!(
                        "sslmode must be 'require', got '{value}'"
                    )));
                }
                other => {
                    return Err(DbError::InvalidDescriptor(format!("unknown key '{other}'")));
                }
            }
        }

        let missing = |name: &str| DbError::InvalidDescriptor(format!("missing '{name}'"));

        Ok(Self {
            host: host.ok_or_else(|| missing("host"))?,
            port,
            user: user.ok_or_else(|| missing("user"))?,
            dbname: dbname.ok_or_else(|| missing("dbname"))?,
            password,
        })
    }
}

/// Build a descriptor from its parts.
///
/// Pass an empty `pass` when no password is configured; the slot is still
/// emitted.
pub fn conn_string(host: &str, port: u16, user: &str, db_name: &str, pass: &str) -> String {
    format!("host={host} password={pass} port={port} user={user} dbname={db_name} sslmode=require")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_all_slots_in_order() {
        let s = conn_string("db.local", 5433, "app", "hr", "s3cret");
        assert_eq!(
            s,
            "host=db.local password=s3cret port=5433 user=app dbname=hr sslmode=require"
        );
    }

    #[test]
    fn empty_password_keeps_the_slot() {
        let s = conn_string("localhost", 5432, "postgres", "hr", "");
        assert_eq!(
            s,
            "host=localhost password= port=5432 user=postgres dbname=hr sslmode=require"
        );
    }

    #[test]
    fn parses_its_own_output() {
        let cfg = ConnConfig::new("localhost", 6543, "app", "hr", "pw");
        let parsed: ConnConfig = cfg.conn_string().parse().expect("valid descriptor");
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn parses_empty_password_and_default_port() {
        let cfg: ConnConfig = "host=h password= user=u dbname=d sslmode=require"
            .parse()
            .expect("valid descriptor");
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.password, "");
    }

    #[test]
    fn rejects_non_tls_sslmode() {
        let err = "host=h user=u dbname=d sslmode=disable"
            .parse::<ConnConfig>()
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidDescriptor(_)));
    }

    #[test]
    fn rejects_unknown_keys_bad_ports_and_missing_fields() {
        for bad in [
            "host=h user=u dbname=d application_name=x",
            "host=h user=u dbname=d port=abc",
            "host=h user=u dbname",
            "host=h user=u",
        ] {
            assert!(
                matches!(bad.parse::<ConnConfig>(), Err(DbError::InvalidDescriptor(_))),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn redacted_and_debug_hide_the_password() {
        let cfg = ConnConfig::new("h", 5432, "u", "d", "hunter2");
        assert!(!cfg.redacted().contains("hunter2"));
        assert!(cfg.redacted().contains("password=***"));
        assert!(!format!("{cfg:?}").contains("hunter2"));
    }

    #[test]
    fn connect_options_carry_the_config() {
        let cfg = ConnConfig::new("db.local", 5433, "app", "hr", "");
        let opts = cfg.connect_options();
        assert_eq!(opts.get_host(), "db.local");
        assert_eq!(opts.get_port(), 5433);
        assert_eq!(opts.get_username(), "app");
        assert_eq!(opts.get_database(), Some("hr"));
        assert!(matches!(opts.get_ssl_mode(), PgSslMode::Require));
    }
}
