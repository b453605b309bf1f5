// --- Module Structure ---

// Core session services and collaborators.
pub mod api;
pub mod config;
pub mod errors;
pub mod guard;
pub mod models;
pub mod navigation;
pub mod session;
pub mod storage;

// --- Public Re-exports ---

// Makes the core types easily accessible to the binary entry point and to
// downstream consumers embedding the session service.
pub use api::{AuthApi, AuthApiState, HttpAuthApi, MockAuthApi};
pub use config::{AppConfig, Env};
pub use errors::AuthError;
pub use guard::{GuardDecision, LOGIN_ROUTE, UNAUTHORIZED_ROUTE};
pub use models::{LoginCredentials, PersistedSession, RegisterRequest, Role, TokenPair, User};
pub use navigation::NavEntry;
pub use session::{AuthCheck, SessionStore, SessionView};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage, StorageState};
