use std::sync::Arc;
use std::time::Duration;

use auth::InMemoryRevocationStore;
use auth::JwtHandler;
use auth::TokenService;
use auth_service::config::Config;
use auth_service::domain::auth::ports::AuthServicePort;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::maintenance::spawn_revocation_sweeper;
use auth_service::outbound::repositories::InMemoryUserDirectory;
use auth_service::outbound::repositories::JsonFileUserDirectory;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        users_file = ?config.store.users_file,
        "Configuration loaded"
    );

    // Misconfigured signing is fatal here, never per request
    let jwt_handler = JwtHandler::from_config(config.jwt.secret.as_bytes(), &config.jwt.algorithm)?;
    let algorithm = jwt_handler.algorithm();
    let token_service = Arc::new(TokenService::new(
        jwt_handler,
        Arc::new(InMemoryRevocationStore::new()),
        config.jwt.token_policy()?,
    ));

    let policy = token_service.policy();
    tracing::info!(
        algorithm = ?algorithm,
        access_token_ttl_minutes = policy.access_ttl.num_minutes(),
        refresh_window_minutes = policy.refresh_window.num_minutes(),
        "Token service ready"
    );

    let auth_service: Arc<dyn AuthServicePort> = match &config.store.users_file {
        Some(path) => {
            let directory = Arc::new(JsonFileUserDirectory::open(path).await?);
            tracing::info!(path = %directory.path().display(), "Using file-backed user directory");
            Arc::new(AuthService::new(directory, Arc::clone(&token_service)))
        }
        None => {
            tracing::warn!("No users_file configured, accounts will not survive a restart");
            let directory = Arc::new(InMemoryUserDirectory::new());
            Arc::new(AuthService::new(directory, Arc::clone(&token_service)))
        }
    };

    let sweeper = spawn_revocation_sweeper(
        Arc::clone(&token_service),
        Duration::from_secs(config.revocation.sweep_interval_seconds.max(1)),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
