use thiserror::Error;

/// AuthError
///
/// The failure taxonomy of the session subsystem. Only `login` and `register`
/// ever propagate these to callers; `check_auth` and `logout` handle every
/// failure internally (silent demotion to anonymous) and are structurally
/// infallible.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the supplied credentials or registration payload.
    /// Carries the server-supplied human-readable detail message so calling
    /// forms can surface it directly.
    #[error("{0}")]
    Credentials(String),

    /// Any other non-2xx response from the backend.
    #[error("request failed with status {status}: {detail}")]
    Api { status: u16, detail: String },

    /// Network or transport-level failure before a response was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Durable client storage could not be initialized.
    #[error("session storage error: {0}")]
    Storage(String),
}
