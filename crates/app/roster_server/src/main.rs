//! Roster API server binary.
//!
//! `roster_server` (or `roster_server serve`) applies pending migrations and
//! serves the REST API. `roster_server migrate up|down` manages the schema
//! without serving.

use clap::{Parser, Subcommand};
use roster_api::config::{ApiConfig, DEFAULT_BIND_ADDR, DEFAULT_DATABASE_URL};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "roster_server", about = "Roster API server", version)]
struct Args {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR, global = true)]
    bind_addr: String,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL, global = true)]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5, global = true)]
    max_connections: u32,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations, then serve the API (default).
    Serve,
    /// Manage the database schema.
    Migrate {
        #[command(subcommand)]
        direction: MigrateDirection,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateDirection {
    /// Apply all pending migrations.
    Up,
    /// Revert the latest applied migration, or everything newer than `--target`.
    Down {
        #[arg(long)]
        target: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,roster_api=debug,roster_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    info!(max_connections = args.max_connections, "configuring connection pool");
    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            // CLI values win over the environment defaults.
            let config = ApiConfig {
                bind_addr: args.bind_addr,
                pg_connection_url: args.database_url,
                ..ApiConfig::from_env()
            };
            serve(pool, config).await?;
        }
        Command::Migrate { direction } => migrate(&pool, direction).await?,
    }

    Ok(())
}

async fn migrate(
    pool: &PgPool,
    direction: MigrateDirection,
) -> Result<(), sqlx::migrate::MigrateError> {
    match direction {
        MigrateDirection::Up => {
            roster_core::migrate::migrate(pool).await?;
            info!("migrations applied");
        }
        MigrateDirection::Down { target: Some(target) } => {
            roster_core::migrate::revert_to(pool, target).await?;
        }
        MigrateDirection::Down { target: None } => {
            match roster_core::migrate::revert_last(pool).await? {
                Some(version) => info!(version, "migration reverted"),
                None => info!("no applied migrations to revert"),
            }
        }
    }
    Ok(())
}

async fn serve(pool: PgPool, config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("running database migrations");
    roster_api::migrate(&pool).await?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let app = roster_api::router(roster_api::AppState { pool, config });

    info!(addr = %local_addr, "REST API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
