//! HTTP server command
//!
//! Runs the questions and answers API against PostgreSQL, or against the
//! in-process store with `--in-memory`.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use qa_server::db::{create_pool_with_options, migrations, DEFAULT_MAX_CONNECTIONS};
use qa_server::{run_server, MemorySessionSource, PgSessionSource, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "QA_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "QA_CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "QA_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Keep everything in process memory (lost on exit); ignores --database-url
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        run_server(MemorySessionSource::new(), config)
            .await
            .context("Server error")?;
        return Ok(());
    }

    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env or .env, or pass --in-memory")?;

    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Starting qa server on {}", args.bind);

    // Blocks until shutdown
    run_server(PgSessionSource::new(pool), config)
        .await
        .context("Server error")?;

    Ok(())
}
