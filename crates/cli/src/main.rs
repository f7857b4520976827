//! `pg-gql` CLI entry-point.
//!
//! Available sub-commands:
//! - `ping`        — open the connection and run the liveness check.
//! - `users`       — look up users by first name.
//! - `jobs`        — look up jobs by title.
//! - `conn-string` — print the connection descriptor (password masked).

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use db::{ConnConfig, Db, Directory};

#[derive(Parser)]
#[command(
    name = "pg-gql",
    about = "Look up users and jobs in Postgres",
    version
)]
struct Cli {
    #[command(flatten)]
    conn: ConnArgs,

    #[command(subcommand)]
    command: Command,
}

/// Connection settings, falling back to the standard libpq variables.
#[derive(Args)]
struct ConnArgs {
    #[arg(long, env = "PGHOST", default_value = "localhost", global = true)]
    host: String,
    #[arg(long, env = "PGPORT", default_value_t = db::conn::DEFAULT_PORT, global = true)]
    port: u16,
    #[arg(long, env = "PGUSER", default_value = "postgres", global = true)]
    user: String,
    #[arg(long, env = "PGDATABASE", default_value = "postgres", global = true)]
    dbname: String,
    /// Empty when unset; the descriptor always carries the slot.
    #[arg(long, env = "PGPASSWORD", default_value = "", hide_env_values = true, global = true)]
    password: String,
}

impl From<ConnArgs> for ConnConfig {
    fn from(a: ConnArgs) -> Self {
        ConnConfig::new(a.host, a.port, a.user, a.dbname, a.password)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Open a connection and verify it answers.
    Ping,
    /// Print users whose first name matches exactly.
    Users {
        #[arg(long)]
        first_name: String,
    },
    /// Print jobs whose title matches exactly.
    Jobs {
        #[arg(long)]
        title: String,
    },
    /// Print the connection descriptor with the password masked.
    ConnString,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConnConfig::from(cli.conn);

    match cli.command {
        Command::ConnString => {
            println!("{}", config.redacted());
        }
        Command::Ping => {
            connect(&config).await?;
            info!("Database is reachable");
        }
        Command::Users { first_name } => {
            let db = connect(&config).await?;
            let users = db
                .users_by_first_name(&first_name)
                .await
                .with_context(|| format!("looking up users named '{first_name}'"))?;
            print_json(&users)?;
        }
        Command::Jobs { title } => {
            let db = connect(&config).await?;
            let jobs = db
                .jobs_by_title(&title)
                .await
                .with_context(|| format!("looking up jobs titled '{title}'"))?;
            print_json(&jobs)?;
        }
    }

    Ok(())
}

async fn connect(config: &ConnConfig) -> anyhow::Result<Db> {
    Db::connect(config)
        .await
        .with_context(|| format!("failed to connect to {}", config.redacted()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
