use std::sync::Arc;

use mindporium_session::{
    AuthCheck, SessionStore,
    api::{AuthApiState, HttpAuthApi},
    config::{AppConfig, Env},
    guard::LOGIN_ROUTE,
    navigation,
    storage::{FileSessionStorage, StorageState},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The session doctor: bootstraps the client exactly the way an embedding app
/// would (configuration, logging, collaborators, session service), performs the
/// silent auth check, and reports the resolved session and navigation surface.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Prioritizes RUST_LOG, falling back to sensible defaults for local use.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mindporium_session=debug,reqwest=info".into());

    // 3. Initialize Logging based on Environment
    // Pretty output for humans locally, JSON for log aggregators in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Session client starting in {:?} mode", config.env);
    tracing::info!("API base URL: {}", config.api_base_url);

    // 4. Collaborator Assembly
    // Durable storage is mandatory; without it no session can survive a restart.
    let storage = Arc::new(
        FileSessionStorage::new(&config.storage_dir)
            .expect("FATAL: could not open session storage. Check MINDPORIUM_STATE_DIR."),
    ) as StorageState;

    let api = Arc::new(HttpAuthApi::new(&config.api_base_url)) as AuthApiState;

    // 5. Session Service Construction & Silent Bootstrap
    let store = SessionStore::new(api, storage);

    match store.check_auth().await {
        AuthCheck::Authenticated(user) => {
            tracing::info!(
                "Session resolved: {} <{}> role={}",
                user.full_name,
                user.email,
                user.role.as_str()
            );
            tracing::info!(
                "Default landing route: {}",
                navigation::default_route(Some(user.role))
            );
            for item in navigation::menu_for(Some(user.role)) {
                tracing::info!("  [{}] {} -> {}", item.icon, item.label, item.path);
            }
        }
        AuthCheck::Anonymous => {
            tracing::info!(
                "No active session; authentication required at {}",
                LOGIN_ROUTE
            );
        }
    }
}
