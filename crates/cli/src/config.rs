//! Runtime configuration, read from flags with environment fallbacks.

use anyhow::{bail, Result};
use clap::Args;

/// Database settings shared by every sub-command.
#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Upper bound on pooled connections.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,
}

/// Validated configuration for `serve`.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind: String,
}

impl Config {
    pub fn new(db: DatabaseArgs, bind: String) -> Result<Self> {
        let config = Self {
            database_url: db.database_url,
            max_connections: db.max_connections,
            bind,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            bail!("DATABASE_URL must not be empty");
        }
        if self.max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be greater than 0");
        }
        if self.bind.parse::<std::net::SocketAddr>().is_err() {
            bail!("bind address '{}' is not a valid socket address", self.bind);
        }
        Ok(())
    }
}
