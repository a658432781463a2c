//! Validly server entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tokio::{signal, sync::watch};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use validly::adapters::http::{api_router, AuthState, IdeaHandlers};
use validly::adapters::{
    JwtSessionValidator, MarkdownIdeaRenderer, PostgresIdeaReader, PostgresIdeaRepository,
    SystemClock,
};
use validly::application::{AutoDeleteSweeper, SweeperConfig};
use validly::config::{AppConfig, ServerConfig};
use validly::ports::{IdeaDocumentRenderer, IdeaReader, IdeaRepository};

/// Waits for SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.clone()));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(environment = ?config.server.environment, "Starting Validly server");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    info!("Connected to database");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations completed");
    }

    let repository: Arc<dyn IdeaRepository> = Arc::new(PostgresIdeaRepository::new(pool.clone()));
    let reader: Arc<dyn IdeaReader> = Arc::new(PostgresIdeaReader::new(pool.clone()));
    let renderer: Arc<dyn IdeaDocumentRenderer> = Arc::new(MarkdownIdeaRenderer::new());
    let validator: AuthState = Arc::new(JwtSessionValidator::new(
        &config.auth.jwt_secret,
        config.auth.issuer(),
        config.auth.leeway_secs,
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_task = if config.sweeper.enabled {
        let sweeper = AutoDeleteSweeper::new(
            repository.clone(),
            Arc::new(SystemClock),
            SweeperConfig::default().with_interval(config.sweeper.interval()),
        );
        info!(interval_secs = config.sweeper.interval_secs, "Auto-delete sweeper enabled");
        Some(tokio::spawn(async move { sweeper.run(shutdown_rx).await }))
    } else {
        None
    };

    let app = api_router(IdeaHandlers::new(repository, reader, renderer), validator)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if shutdown_tx.send(true).is_err() {
        debug!("No sweeper listening for shutdown");
    }
    if let Some(task) = sweeper_task {
        if let Err(e) = task.await {
            tracing::error!(error = %e, "sweeper task panicked");
        }
    }
    pool.close().await;
    info!("Server stopped");

    Ok(())
}
