//! Blog API server binary.
//!
//! Loads `.env`, connects to PostgreSQL, applies migrations and serves the
//! REST API until interrupted.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use blog_api::config::ApiConfig;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "blog_api_server", about = "Blog API server")]
struct Args {
    /// Port to listen on. Overrides the port of `BIND_ADDR` when given.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/blog"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,blog_api=debug,blog_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    config.pg_connection_url = args.database_url;
    if let Some(port) = args.port {
        config.bind_addr = with_port(&config.bind_addr, port);
    }

    info!(
        bind_addr = %config.bind_addr,
        max_connections = args.max_connections,
        token_ttl_secs = config.access_token_ttl_secs,
        "starting blog_api_server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.pg_connection_url)
        .await?;

    info!("running database migrations");
    blog_api::migrate(&pool).await?;

    let state = blog_api::AppState::new(pool, config.clone());
    let app = blog_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Replace the port of a `host:port` bind address.
fn with_port(bind_addr: &str, port: u16) -> String {
    let host = bind_addr
        .rsplit_once(':')
        .map_or(bind_addr, |(host, _)| host);
    format!("{host}:{port}")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
