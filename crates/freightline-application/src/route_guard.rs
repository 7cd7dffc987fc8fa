//! Rehydration-aware route guard.
//!
//! Wraps the pure routing decision with the rehydration gate: no
//! redirect is issued while persisted session state may still be
//! loading, so a signed-in user refreshing a protected route is not
//! bounced to the login page by a race.

use freightline_core::rehydration::RehydrationGate;
use freightline_core::routing::{self, RouteDecision};
use freightline_core::session::SessionManager;
use std::sync::Arc;

/// A non-blocking guard probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Rehydration has not finished; render nothing and ask again.
    Loading,
    Decided(RouteDecision),
}

pub struct RouteGuard {
    session: Arc<SessionManager>,
    gate: RehydrationGate,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionManager>, gate: RehydrationGate) -> Self {
        Self { session, gate }
    }

    /// Decides whether the active identity may visit `route`, waiting
    /// for rehydration to finish first.
    pub async fn authorize(&self, route: &str) -> RouteDecision {
        self.gate.ready().await;
        let identity = self.session.active_identity().await;
        let decision = routing::authorize(identity.as_ref(), route);
        if let RouteDecision::RedirectTo(target) = &decision {
            tracing::debug!(route, target, "route access denied");
        }
        decision
    }

    /// Non-blocking variant: reports `Loading` until the gate opens
    /// instead of waiting on it.
    pub async fn poll(&self, route: &str) -> GuardOutcome {
        if !self.gate.is_ready() {
            return GuardOutcome::Loading;
        }
        let identity = self.session.active_identity().await;
        GuardOutcome::Decided(routing::authorize(identity.as_ref(), route))
    }
}
