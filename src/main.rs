use anyhow::Context;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use traffic_ops_tenancy::config;
use traffic_ops_tenancy::database::DatabaseManager;
use traffic_ops_tenancy::handlers::{router, AppState};
use traffic_ops_tenancy::is_production;
use traffic_ops_tenancy::tenancy::PgBackend;

/// Traffic Ops tenancy service
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Port to listen on (overrides API_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Log filter directive, e.g. "info,traffic_ops_tenancy=debug"
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_filter).context("invalid log filter")?)
        .with_ansi(!is_production!())
        .init();

    let config = config::config();
    tracing::info!("Starting Traffic Ops tenancy service in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the Traffic Ops database")?;

    let app = router(AppState::new(PgBackend::new(pool.clone())));
    let app = if config.api.enable_request_logging {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    };

    let port = cli.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
