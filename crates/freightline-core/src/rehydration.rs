//! Rehydration gate.
//!
//! A process-wide two-state barrier (`Loading | Ready`). Routes must not
//! render and authenticated requests must not fire until previously
//! persisted session state has been restored; this prevents a freshly
//! started process from briefly treating a logged-in user as logged out
//! and firing an unauthenticated request or bouncing to the login page.

use std::sync::Arc;
use tokio::sync::watch;

/// One-shot readiness barrier with any number of waiters.
///
/// Starts closed; [`RehydrationGate::open`] flips it exactly once when
/// the persistence adapter finishes loading, whether or not it found
/// data. Clones share the same gate.
#[derive(Clone)]
pub struct RehydrationGate {
    ready: Arc<watch::Sender<bool>>,
}

impl RehydrationGate {
    /// Creates a closed gate.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            ready: Arc::new(tx),
        }
    }

    /// Opens the gate. Calling it again has no effect.
    pub fn open(&self) {
        let flipped = self.ready.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        });
        if flipped {
            tracing::info!("rehydration complete, gate open");
        }
    }

    /// Whether rehydration has completed.
    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Suspends until the gate is open; returns immediately if it
    /// already is.
    pub async fn ready(&self) {
        let mut rx = self.ready.subscribe();
        // The sender lives in self, so wait_for cannot see it dropped.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl Default for RehydrationGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_gate_starts_closed() {
        let gate = RehydrationGate::new();
        assert!(!gate.is_ready());
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let gate = RehydrationGate::new();
        gate.open();
        gate.open();
        assert!(gate.is_ready());
    }

    #[tokio::test]
    async fn test_waiters_resume_when_opened() {
        let gate = RehydrationGate::new();
        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move {
                gate.ready().await;
                true
            })
        };
        gate.open();
        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_ready_returns_immediately_when_already_open() {
        let gate = RehydrationGate::new();
        gate.open();
        gate.ready().await;
    }
}
