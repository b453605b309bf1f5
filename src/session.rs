use std::sync::{Mutex, MutexGuard};

use crate::api::AuthApiState;
use crate::errors::AuthError;
use crate::models::{LoginCredentials, PersistedSession, RegisterRequest, Role, User};
use crate::storage::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SNAPSHOT_KEY, StorageState};

/// AuthCheck
///
/// The tagged outcome of the silent auth bootstrap. `check_auth` never fails:
/// a stale or rejected token is demoted to `Anonymous` rather than surfaced as
/// an error, so the app shell never blocks on a transient backend blip.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthCheck {
    Anonymous,
    Authenticated(User),
}

/// SessionView
///
/// A cheap projection of the session fields the route guard decides on.
/// Reading a view takes the state lock once, so guard decisions always see a
/// single consistent snapshot rather than three independently racing reads.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub role: Option<Role>,
}

/// SessionState
///
/// The full in-memory session record. `is_loading` and `error` are
/// request-lifecycle-scoped and never reach durable storage; the persisted
/// subset is the separate [`PersistedSession`] projection.
#[derive(Debug, Clone, Default)]
struct SessionState {
    user: Option<User>,
    access_token: Option<String>,
    is_authenticated: bool,
    is_loading: bool,
    error: Option<String>,
}

/// SessionStore
///
/// The single source of truth for "who is logged in". All session mutations go
/// through this store's operations; no caller holds its own copy of the
/// authenticated identity.
///
/// **Consistency guarantee**: every operation that can fail settles the store in
/// a fully consistent anonymous-or-authenticated state. There is no reachable
/// state where `is_authenticated` is true without a user and an access token,
/// and no operation leaves `is_loading` set after it resolves.
///
/// Concurrency: state lives behind a `Mutex`; if two operations race (e.g. a
/// login submitted while a background auth check resolves) the last writer wins.
/// No request cancellation is performed, the collaborator calls are idempotent.
pub struct SessionStore {
    api: AuthApiState,
    storage: StorageState,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// new
    ///
    /// Constructs the session service from its two collaborators. Durable
    /// storage is read exactly once here: a persisted snapshot rehydrates the
    /// session so a restarted client renders as authenticated immediately,
    /// pending verification by the next `check_auth`.
    pub fn new(api: AuthApiState, storage: StorageState) -> Self {
        let state = storage
            .get(SNAPSHOT_KEY)
            .and_then(|raw| PersistedSession::deserialize(&raw))
            .map(|snapshot| SessionState {
                user: Some(snapshot.user),
                access_token: Some(snapshot.access_token),
                is_authenticated: snapshot.is_authenticated,
                ..SessionState::default()
            })
            .unwrap_or_default();

        Self {
            api,
            storage,
            state: Mutex::new(state),
        }
    }

    // --- Operations ---

    /// login
    ///
    /// Exchanges credentials for a token pair, persists both tokens, then fetches
    /// the current user with the new access token. Two sequential network calls;
    /// the second depends on the first's output.
    ///
    /// Returns the resolved user so the caller can branch on role for the
    /// post-login redirect. On any failure (bad credentials, transport, or
    /// user-fetch failure) the store resets to anonymous, records the failure
    /// message in `error`, and propagates the failure.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        self.begin_attempt();

        let tokens = match self.api.login(credentials).await {
            Ok(tokens) => tokens,
            Err(e) => return Err(self.fail_to_anonymous(e)),
        };

        // Persist the raw tokens first so the HTTP collaborator can read them
        // directly for subsequent requests.
        self.storage.set(ACCESS_TOKEN_KEY, &tokens.access_token);
        self.storage.set(REFRESH_TOKEN_KEY, &tokens.refresh_token);

        let user = match self.api.current_user(&tokens.access_token).await {
            Ok(user) => user,
            // The user fetch failing right after a successful token exchange
            // still counts as a failed login: the just-persisted credentials
            // are cleared along with the in-memory state.
            Err(e) => return Err(self.fail_to_anonymous(e)),
        };

        {
            let mut state = self.state();
            *state = SessionState {
                user: Some(user.clone()),
                access_token: Some(tokens.access_token),
                is_authenticated: true,
                is_loading: false,
                error: None,
            };
        }
        self.persist_snapshot();

        Ok(user)
    }

    /// register
    ///
    /// Creates a new account. Deliberately does **not** authenticate it: the
    /// observed contract is two-step, callers chain an explicit `login` when
    /// auto-login is desired. Tokens and auth status are never touched here;
    /// only `is_loading`/`error` move.
    pub async fn register(&self, data: &RegisterRequest) -> Result<User, AuthError> {
        self.begin_attempt();

        match self.api.register(data).await {
            Ok(user) => {
                self.state().is_loading = false;
                Ok(user)
            }
            Err(e) => {
                let mut state = self.state();
                state.is_loading = false;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// logout
    ///
    /// Clears both persisted tokens and the persisted snapshot, then resets the
    /// in-memory state to anonymous. Side-effect only: never fails, idempotent,
    /// and performs no network call.
    pub fn logout(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(SNAPSHOT_KEY);
        *self.state() = SessionState::default();
    }

    /// check_auth
    ///
    /// The silent session bootstrap. With no persisted access token this
    /// resolves to `Anonymous` immediately, without any network call, so an
    /// anonymous first paint never depends on the backend. With a token present
    /// it verifies against `/users/me`; a rejected or unreachable verification
    /// is demoted to an implicit `logout` rather than an error.
    pub async fn check_auth(&self) -> AuthCheck {
        let token = match self.storage.get(ACCESS_TOKEN_KEY) {
            Some(token) => token,
            None => {
                *self.state() = SessionState::default();
                return AuthCheck::Anonymous;
            }
        };

        self.state().is_loading = true;

        match self.api.current_user(&token).await {
            Ok(user) => {
                {
                    let mut state = self.state();
                    *state = SessionState {
                        user: Some(user.clone()),
                        access_token: Some(token),
                        is_authenticated: true,
                        is_loading: false,
                        error: None,
                    };
                }
                self.persist_snapshot();
                AuthCheck::Authenticated(user)
            }
            Err(e) => {
                tracing::debug!("auth check failed, demoting to anonymous: {}", e);
                self.logout();
                AuthCheck::Anonymous
            }
        }
    }

    /// set_user
    ///
    /// Replaces the resolved user in place (used after a profile edit) without
    /// touching tokens or auth status. The persisted snapshot is refreshed so a
    /// reload sees the updated profile.
    pub fn set_user(&self, user: User) {
        self.state().user = Some(user);
        self.persist_snapshot();
    }

    /// clear_error
    ///
    /// Resets the last failure message. Also performed implicitly at the start
    /// of every `login`/`register` attempt.
    pub fn clear_error(&self) {
        self.state().error = None;
    }

    // --- Read Accessors ---

    /// Returns the projection the route guard decides on.
    pub fn view(&self) -> SessionView {
        let state = self.state();
        SessionView {
            is_loading: state.is_loading,
            is_authenticated: state.is_authenticated,
            role: state.user.as_ref().map(|u| u.role),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.state().user.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state().access_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    // --- Internals ---

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("session state lock poisoned")
    }

    /// Marks the start of a fallible attempt: loading on, prior error cleared.
    fn begin_attempt(&self) {
        let mut state = self.state();
        state.is_loading = true;
        state.error = None;
    }

    /// Settles a failed `login` attempt: persisted credentials cleared, state
    /// reset to anonymous with the failure message recorded, error re-raised.
    fn fail_to_anonymous(&self, e: AuthError) -> AuthError {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(SNAPSHOT_KEY);
        *self.state() = SessionState {
            error: Some(e.to_string()),
            ..SessionState::default()
        };
        e
    }

    /// Writes the persisted subset to durable storage. Only an authenticated
    /// session produces a snapshot; transient fields are never written.
    fn persist_snapshot(&self) {
        let snapshot = {
            let state = self.state();
            match (&state.user, &state.access_token, state.is_authenticated) {
                (Some(user), Some(token), true) => PersistedSession {
                    access_token: token.clone(),
                    user: user.clone(),
                    is_authenticated: true,
                },
                _ => return,
            }
        };

        match snapshot.serialize() {
            Ok(raw) => self.storage.set(SNAPSHOT_KEY, &raw),
            Err(e) => tracing::error!("session snapshot serialize error: {:?}", e),
        }
    }
}
