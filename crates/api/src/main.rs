use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use fds_api::config::ServerConfig;
use fds_api::router::build_app_router;
use fds_api::state::AppState;

/// Database used when `DATABASE_URL` is unset.
const DEFAULT_DATABASE_URL: &str = "sqlite://fds.db";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        overdue_window_months = config.overdue_window_months,
        token_ttl_mins = config.token.ttl_mins,
        "Loaded server configuration"
    );

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
    let pool = fds_db::create_pool(&database_url)
        .await
        .with_context(|| format!("opening database {database_url}"))?;
    fds_db::health_check(&pool)
        .await
        .context("database health check")?;
    fds_db::run_migrations(&pool)
        .await
        .context("applying migrations")?;

    let addr = SocketAddr::new(
        config
            .host
            .parse()
            .with_context(|| format!("invalid HOST '{}'", config.host))?,
        config.port,
    );

    let app = build_app_router(AppState {
        pool: pool.clone(),
        config: Arc::new(config),
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// `RUST_LOG` selects levels; `LOG_FORMAT=json` switches to one JSON object
/// per line for log shippers.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fds_api=debug,fds_db=info,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, draining connections"),
        () = terminate => tracing::info!("Received SIGTERM, draining connections"),
    }
}
