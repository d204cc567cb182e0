//! Keygate Server — session credential service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use keygate_core::config::AppConfig;
use keygate_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("KEYGATE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Keygate v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db_pool = keygate_database::connection::connect(&config.database).await?;
    keygate_database::migration::run_migrations(&db_pool).await?;

    // ── Repositories ─────────────────────────────────────────────
    let users = Arc::new(keygate_database::repositories::UserRepository::new(
        db_pool.clone(),
    ));
    let tokens = Arc::new(keygate_database::repositories::RefreshTokenRepository::new(
        db_pool.clone(),
    ));

    // ── Auth system ──────────────────────────────────────────────
    let jwt_encoder = Arc::new(keygate_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(keygate_auth::jwt::JwtDecoder::new(&config.auth));
    let token_issuer = Arc::new(keygate_auth::token::TokenIssuer::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&tokens),
        &config.auth,
    ));
    let session_manager = Arc::new(keygate_auth::session::SessionManager::new(
        Arc::clone(&users),
        Arc::clone(&tokens),
        Arc::clone(&token_issuer),
        &config.auth,
        &config.session,
        config.federation.clone(),
    ));

    // ── Background sweep ─────────────────────────────────────────
    let mut scheduler = if config.worker.enabled {
        let reclaimer = keygate_worker::TokenReclaimer::new(Arc::clone(&tokens));
        let scheduler = keygate_worker::SweepScheduler::new(&config.worker, reclaimer).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background sweep disabled");
        None
    };

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = keygate_api::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        users,
        tokens,
        jwt_decoder,
        session_manager,
    };

    let app = keygate_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Keygate server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(scheduler) = scheduler.as_mut() {
        let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
        let _ = tokio::time::timeout(grace, scheduler.shutdown()).await;
    }

    tracing::info!("Keygate server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
