use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cafe_api::config::ServerConfig;
use cafe_api::router::build_app_router;
use cafe_api::state::{load_menu, open_store, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cafe_api=debug,cafe_db=info,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage_backend,
        "Loaded server configuration",
    );
    if config.staff.admin_password_hash.is_none() {
        tracing::warn!("ADMIN_PASSWORD_HASH is not set; admin login is disabled");
    }
    if config.image_host.is_none() {
        tracing::warn!("IMAGE_HOST_UPLOAD_URL is not set; photo uploads are disabled");
    }

    // --- Storage ---
    let store = open_store(&config)
        .await
        .expect("Failed to open the document store");
    cafe_db::health_check(&store)
        .await
        .expect("Storage health check failed");
    tracing::info!(data_dir = %config.data_dir.display(), "Storage health check passed");

    // --- Menu ---
    let menu = load_menu(config.menu_path.as_deref()).expect("Failed to load the menu");
    tracing::info!(items = menu.items.len(), "Menu loaded");

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be a valid IP address"),
        config.port,
    );
    let state = AppState::new(store, config.clone(), menu)
        .expect("Failed to build the image host client");

    let app = build_app_router(state, &config);

    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
