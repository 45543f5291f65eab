//! `invoice-actions` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — apply migrations and start the dashboard API.
//! - `migrate` — apply pending database migrations and exit.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, DatabaseArgs};

#[derive(Parser)]
#[command(
    name = "invoice-actions",
    about = "Form-validated invoice mutations over Postgres",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind: String,
        #[command(flatten)]
        db: DatabaseArgs,
    },
    /// Run pending database migrations.
    Migrate {
        #[command(flatten)]
        db: DatabaseArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "invoice_actions=info,invoices=info,api=info,db=info,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, db: database } => {
            let config = Config::new(database, bind)?;
            let pool = db::pool::create_pool(&config.database_url, config.max_connections)
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool)
                .await
                .context("migration failed")?;

            info!("Starting API server on {}", config.bind);
            api::serve(&config.bind, api::AppState::postgres(pool))
                .await
                .context("server error")?;
        }
        Command::Migrate { db: database } => {
            info!("Running migrations");
            let pool = db::pool::create_pool(&database.database_url, database.max_connections.max(1))
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool)
                .await
                .context("migration failed")?;
            info!("Migrations applied successfully");
        }
    }

    Ok(())
}
