//! Route authorization.
//!
//! A pure policy function: given the active identity (or none) and a
//! requested route, decide whether to render it or bounce. Callers must
//! only evaluate this after the rehydration gate is open, otherwise a
//! still-loading session would be mistaken for "not logged in".

use crate::identity::Identity;

/// Route every authorization failure bounces to.
pub const LOGIN_ROUTE: &str = "/login";

/// Outcome of a route authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectTo(String),
}

/// Whether a route requires an authenticated identity at all.
///
/// Everything under `/dashboard` is protected; login, registration and
/// the landing page are public.
pub fn is_protected(route: &str) -> bool {
    route == "/dashboard" || route.starts_with("/dashboard/")
}

/// Decides whether `identity` may enter `route`.
///
/// Policy: unauthenticated access to any protected route redirects to
/// login; an authenticated identity is allowed only into its own role's
/// dashboard subtree. A role/route mismatch also redirects to login
/// rather than a dedicated forbidden page.
pub fn authorize(identity: Option<&Identity>, route: &str) -> RouteDecision {
    if !is_protected(route) {
        return RouteDecision::Allow;
    }

    let Some(identity) = identity else {
        return RouteDecision::RedirectTo(LOGIN_ROUTE.to_string());
    };

    let prefix = identity.role.dashboard_route();
    if route == prefix || route.starts_with(&format!("{}/", prefix)) {
        RouteDecision::Allow
    } else {
        RouteDecision::RedirectTo(LOGIN_ROUTE.to_string())
    }
}
