use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::{Response, StatusCode, header};
use serde::Deserialize;

use crate::errors::AuthError;
use crate::models::{LoginCredentials, RegisterRequest, TokenPair, User};

// 1. AuthApi Contract

/// AuthApi
///
/// Defines the abstract contract for the authentication collaborator: the three
/// backend endpoints the session service depends on. This trait allows the
/// session logic to be tested against the in-process mock (MockAuthApi) instead
/// of a live backend, isolating the test boundary exactly where the network is.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for an access/refresh token pair (POST /auth/login).
    async fn login(&self, credentials: &LoginCredentials) -> Result<TokenPair, AuthError>;

    /// Creates a new account (POST /auth/register). Returns the created identity.
    /// Registration never issues tokens; authentication is a separate `login`.
    async fn register(&self, data: &RegisterRequest) -> Result<User, AuthError>;

    /// Fetches the profile for the bearer token presented (GET /users/me).
    async fn current_user(&self, access_token: &str) -> Result<User, AuthError>;
}

/// AuthApiState
///
/// The concrete type used to share the authentication collaborator across the session service.
pub type AuthApiState = Arc<dyn AuthApi>;

// 2. The Real Implementation (HTTP)

/// ErrorBody
///
/// Minimal struct to deserialize the backend's error responses, which carry a
/// human-readable `detail` message on every non-2xx status.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// HttpAuthApi
///
/// The concrete implementation backed by `reqwest`. All requests target the
/// configured API base URL; the access token is attached as a standard
/// `Authorization: Bearer` header wherever one is required.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// new
    ///
    /// Constructs the HTTP collaborator against the given API base URL
    /// (e.g. "http://localhost:8000/api/v1"). A trailing slash is tolerated.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Maps a non-2xx response to the error taxonomy, extracting the backend's
    /// `detail` message when present and falling back to `fallback` otherwise.
    /// Credential-shaped statuses (400/401/403) become `AuthError::Credentials`
    /// so calling forms can display the message directly.
    async fn failure(response: Response, fallback: &str) -> AuthError {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| fallback.to_string());

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                AuthError::Credentials(detail)
            }
            _ => AuthError::Api {
                status: status.as_u16(),
                detail,
            },
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    /// login
    ///
    /// The backend is an OAuth2 password-form endpoint, so the credentials are
    /// sent form-encoded rather than as JSON.
    async fn login(&self, credentials: &LoginCredentials) -> Result<TokenPair, AuthError> {
        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .form(credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "Login failed").await);
        }

        Ok(response.json::<TokenPair>().await?)
    }

    async fn register(&self, data: &RegisterRequest) -> Result<User, AuthError> {
        let response = self
            .client
            .post(format!("{}/auth/register", self.base_url))
            .json(data)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "Registration failed").await);
        }

        Ok(response.json::<User>().await?)
    }

    async fn current_user(&self, access_token: &str) -> Result<User, AuthError> {
        let response = self
            .client
            .get(format!("{}/users/me", self.base_url))
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", access_token),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "Could not validate credentials").await);
        }

        Ok(response.json::<User>().await?)
    }
}

// 3. The Mock Implementation (For Unit Tests)

/// MockAuthApi
///
/// A mock implementation of `AuthApi` used exclusively for testing. Besides the
/// success/failure switch it counts every call, which lets tests assert the
/// "no network on anonymous bootstrap" property of `check_auth`.
#[derive(Default)]
pub struct MockAuthApi {
    /// The identity returned by `current_user` (and echoed after `register`).
    /// `None` makes `current_user` fail even when `should_fail` is false,
    /// simulating a token the backend no longer accepts.
    pub user: Option<User>,
    /// When true, all operations return a simulated credential failure.
    pub should_fail: bool,
    calls: AtomicUsize,
}

impl MockAuthApi {
    pub fn new(user: User) -> Self {
        Self {
            user: Some(user),
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn new_failing() -> Self {
        Self {
            user: None,
            should_fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Total number of collaborator calls made through this mock.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<TokenPair, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AuthError::Credentials(
                "Incorrect email or password".to_string(),
            ));
        }
        Ok(TokenPair {
            access_token: "mock-access-token".to_string(),
            refresh_token: "mock-refresh-token".to_string(),
            token_type: "bearer".to_string(),
        })
    }

    async fn register(&self, data: &RegisterRequest) -> Result<User, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AuthError::Credentials("Email already registered".to_string()));
        }
        Ok(User {
            email: data.email.clone(),
            full_name: data.full_name.clone(),
            role: data.role,
            is_active: true,
            ..User::default()
        })
    }

    async fn current_user(&self, _access_token: &str) -> Result<User, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AuthError::Credentials(
                "Could not validate credentials".to_string(),
            ));
        }
        match &self.user {
            Some(user) => Ok(user.clone()),
            None => Err(AuthError::Api {
                status: 401,
                detail: "Could not validate credentials".to_string(),
            }),
        }
    }
}
