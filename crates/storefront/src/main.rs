//! Webshop Storefront - demo e-commerce backend.
//!
//! Serves the checkout and webhook API over the reactive store and catalog
//! library. All state is persisted to the configured data directory through
//! the key-value bridge; there is no database.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webshop_storefront::config::WebshopConfig;
use webshop_storefront::routes;
use webshop_storefront::state::AppState;

#[tokio::main]
async fn main() {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "webshop_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WebshopConfig::from_env().expect("Failed to load configuration");
    let state = AppState::new(config.clone()).expect("Failed to initialize application state");

    let validation = state.catalog().validate_slugs();
    if !validation.valid {
        for error in &validation.errors {
            tracing::warn!(%error, "Catalog slug validation");
        }
    }
    tracing::info!(
        products = state.catalog().list().len(),
        log_level = state.stores().settings.log_level().as_directive(),
        "Catalog and stores loaded"
    );

    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
