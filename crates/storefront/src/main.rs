//! Saree Cart Storefront - Shopper-facing site.
//!
//! This binary serves the storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, HTMX-friendly fragments for cart updates
//! - Askama templates for server-side rendering
//! - tower-sessions holds each shopper's cart slot across page loads
//! - `PostgreSQL` session store when a database URL is configured,
//!   in-memory sessions otherwise

#![cfg_attr(not(test), forbid(unsafe_code))]

use saree_cart_storefront::catalog::default_catalog;
use saree_cart_storefront::config::StorefrontConfig;
use saree_cart_storefront::state::AppState;
use secrecy::ExposeSecret;
use sentry::integrations::tracing as sentry_tracing;
use tower_sessions::MemoryStore;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Failures that stop the storefront from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] saree_cart_storefront::config::ConfigError),

    #[error("session database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The subscriber may not be installed yet
        #[allow(clippy::print_stderr)]
        {
            eprintln!("storefront failed to start: {e}");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = StorefrontConfig::from_env()?;

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let state = AppState::new(config.clone(), default_catalog());
    let app = session_backed_app(&config, state)
        .await?
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, landing = %config.landing_path, "storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Install the fmt and Sentry tracing layers.
fn init_tracing() {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "saree_cart_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

/// Build the router over the configured session store.
///
/// Carts live as long as their session, so without a database they vanish
/// when the process exits. The `PostgreSQL` table is created by
/// `saree-cli migrate`, never on startup.
async fn session_backed_app(
    config: &StorefrontConfig,
    state: AppState,
) -> Result<axum::Router, StartupError> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("No database configured, carts last only as long as this process");
        return Ok(saree_cart_storefront::app(state, MemoryStore::default()));
    };

    let pool = sqlx::PgPool::connect(database_url.expose_secret()).await?;
    tracing::info!("Sessions stored in PostgreSQL");
    Ok(saree_cart_storefront::app(state, PostgresStore::new(pool)))
}

/// Resolve on Ctrl+C or SIGTERM.
///
/// A signal source that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl+C handler unavailable: {e}");
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
                tracing::error!("SIGTERM handler unavailable: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutting down, finishing in-flight requests");
}
