use crate::models::Role;
use crate::session::SessionView;

/// Route the guard redirects unauthenticated sessions to. The attempted path is
/// captured alongside so the login flow can return the user afterward.
pub const LOGIN_ROUTE: &str = "/login";
/// Route the guard redirects authenticated but under-privileged sessions to.
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

/// GuardDecision
///
/// The four possible outcomes of guarding a protected subtree. Exactly one is
/// produced for any session view; the caller renders a loading indicator,
/// performs the redirect, or renders the guarded children unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session resolution in flight: render a neutral loading state and nothing
    /// else (no flash of protected or redirect content).
    Loading,
    /// Not authenticated: redirect to [`LOGIN_ROUTE`], carrying the attempted
    /// location for the post-login return.
    RedirectToLogin { from: String },
    /// Authenticated but the role is not in the required allow-list.
    RedirectToUnauthorized,
    /// Render the guarded subtree unchanged.
    Render,
}

/// evaluate
///
/// The route guard: a pure decision function of
/// `{is_loading, is_authenticated, role}`, an optional required-role allow-list,
/// and the current path. No internal state, no side effects; navigation is the
/// caller's job.
///
/// Decision order matters: loading wins over everything (the session may yet
/// resolve as authenticated), then authentication, then the role check.
pub fn evaluate(
    view: &SessionView,
    required_roles: Option<&[Role]>,
    current_path: &str,
) -> GuardDecision {
    if view.is_loading {
        return GuardDecision::Loading;
    }

    if !view.is_authenticated {
        return GuardDecision::RedirectToLogin {
            from: current_path.to_string(),
        };
    }

    if let (Some(required), Some(role)) = (required_roles, view.role) {
        if !required.contains(&role) {
            return GuardDecision::RedirectToUnauthorized;
        }
    }

    GuardDecision::Render
}
