use std::env;
use std::path::PathBuf;

/// AppConfig
///
/// Holds the client's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring a single consistent view across the session
/// service, the HTTP collaborator, and durable storage.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the Mindporium REST API (e.g. "https://api.mindporium.com/api/v1").
    pub api_base_url: String,
    /// Directory holding the durable session state (tokens + persisted snapshot).
    pub storage_dir: PathBuf,
    /// Runtime environment marker. Controls log formatting and fail-fast behavior.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (local API fallback, pretty logs) and hardened production behavior
/// (mandatory configuration, JSON logs).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows the configuration to be instantiated without environment variables
    /// for lightweight unit or integration testing scaffolding.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            storage_dir: env::temp_dir().join("mindporium-test"),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the client configuration at startup.
    /// It reads all parameters from environment variables and implements the
    /// **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime
    /// environment (especially Production) is not found. This prevents the client
    /// from starting against an unknown backend or without a writable state
    /// directory.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // API Base URL Resolution
        // The production URL is mandatory and must be explicitly set.
        let api_base_url = match env {
            Env::Production => env::var("MINDPORIUM_API_URL")
                .expect("FATAL: MINDPORIUM_API_URL must be set in production."),
            // In local, fall back to the default dev backend address.
            _ => env::var("MINDPORIUM_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string()),
        };

        // State Directory Resolution
        // An explicit override wins; otherwise the state lives under the user's
        // home directory so the session survives restarts.
        let storage_dir = env::var("MINDPORIUM_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".mindporium"))
                    .expect("FATAL: no home directory found; set MINDPORIUM_STATE_DIR")
            });

        Self {
            api_base_url,
            storage_dir,
            env,
        }
    }
}
