//! mentorship-server - REST API server binary.

use std::net::SocketAddr;

use mentorship_core::config::{LogConfig, MentorshipConfig};
use mentorship_core::service::AssignmentService;
use mentorship_server::{create_server, AppState};
use mentorship_stores::StoreFactory;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
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

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mentorship_server=debug,mentorship_core=debug"));

    let registry = tracing_subscriber::registry().with(filter);
    if log.json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn load_config() -> Result<MentorshipConfig, mentorship_core::MentorshipError> {
    let base = match std::env::var("MENTORSHIP_CONFIG") {
        Ok(path) => MentorshipConfig::from_file(path)?,
        Err(_) => MentorshipConfig::default(),
    };
    base.apply_env()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = load_config()?;
    init_tracing(&config.log);

    // The store lives for the whole process and is released after shutdown.
    let store = StoreFactory::create(&config.store).await?;
    info!(backend = store.backend_name(), "Store ready");

    let state = AppState::new(AssignmentService::new(store, config.service.clone()));
    if config.service.verify_mentor_exists {
        info!("Mentor existence checks enabled");
    }

    let app = create_server(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Starting mentorship-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
