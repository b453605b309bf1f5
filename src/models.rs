use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Core Identity Schemas (Mapped to the Backend API) ---

/// Role
///
/// The fixed role enumeration driving both authorization (route guard allow-lists)
/// and the default navigation surface. The wire format is the lowercase string
/// used by the backend (`"admin"`, `"instructor"`, `"student"`).
///
/// *Fallback*: any unrecognized role string deserializes to `Student`. The rest of
/// the crate relies on this being total — an unknown role must never surface an
/// empty menu or an unguardable route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    Admin,
    Instructor,
    #[default]
    Student,
}

impl From<String> for Role {
    /// Normalizes a wire role string, applying the student fallback for anything
    /// the client does not recognize (e.g. a role added server-side later).
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "admin" => Role::Admin,
            "instructor" => Role::Instructor,
            _ => Role::Student,
        }
    }
}

impl Role {
    /// Returns the lowercase wire representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
        }
    }
}

/// User
///
/// The authenticated identity as returned by the `/users/me` endpoint.
/// This is the full in-memory profile; only a subset of session state ever
/// reaches durable storage (see [`PersistedSession`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub is_verified: bool,

    // Optional profile fields. Absent fields are omitted from serialized payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// TokenPair
///
/// The credential pair issued by the authentication endpoint on a successful
/// login. Both tokens are opaque to this crate — they are persisted verbatim
/// and attached to outgoing requests, never decoded client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// --- Request Payloads (Input Schemas) ---

/// LoginCredentials
///
/// Input payload for the login endpoint. The backend exposes an OAuth2 password
/// form, which expects the field name `username` even though our identifier is
/// the user's email. Sent form-encoded, never JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// OAuth2 expects 'username', which is our email.
    pub username: String,
    pub password: String,
}

/// RegisterRequest
///
/// Input payload for the public registration endpoint (POST /auth/register).
/// Registration does **not** authenticate the new account; callers that want an
/// auto-login chain an explicit `login` afterwards.
///
/// *Note*: The password is only passed through to the backend and never persisted
/// or logged by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: Role,
}

/// --- Persistence Schema (Durable Storage Boundary) ---

/// PersistedSession
///
/// The narrow "persistable" projection of session state written to durable
/// storage under the `auth-storage` key. This is deliberately a distinct type
/// from the in-memory session: transient fields (`is_loading`, `error`) are
/// request-lifecycle-scoped and must never survive a restart, so they simply
/// cannot be expressed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub access_token: String,
    pub user: User,
    pub is_authenticated: bool,
}

impl PersistedSession {
    /// Serializes the snapshot for durable storage.
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a stored snapshot. A corrupt or incompatible snapshot is
    /// treated as absent rather than an error, demoting the session to anonymous.
    pub fn deserialize(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("discarding unreadable session snapshot: {}", e);
                None
            }
        }
    }
}
