//! Session collaborator
//!
//! The client never acquires or refreshes credentials itself. It asks a
//! [`SessionProvider`] for the current bearer token and reports rejected
//! credentials back through it, so the application can force a new login.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

/// Callback invoked when the service rejects the session.
///
/// Receives the HTTP status, or `None` when the credential was rejected
/// locally before sending.
pub type AuthFailureHandler = Arc<dyn Fn(Option<u16>) + Send + Sync>;

/// Source of the bearer credential for every request
pub trait SessionProvider: Send + Sync {
    /// Current bearer token, if signed in
    fn credential(&self) -> Option<String>;

    /// Register a handler called on every authentication failure
    fn on_auth_failure(&self, handler: AuthFailureHandler);

    /// Notify registered handlers; called by the client
    fn notify_auth_failure(&self, status: Option<u16>);
}

/// A token is structurally valid when it has three non-empty
/// dot-separated segments (`header.payload.signature`).
pub fn is_well_formed_token(token: &str) -> bool {
    let segments: Vec<&str> = token.trim().split('.').collect();
    segments.len() == 3 && segments.iter().all(|s| !s.is_empty())
}

/// Session holding a fixed token supplied on the command line or via the
/// environment
#[derive(Default)]
pub struct StaticSession {
    token: Option<String>,
    handlers: Mutex<Vec<AuthFailureHandler>>,
}

impl StaticSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            handlers: Mutex::new(Vec::new()),
        }
    }
}

impl std::fmt::Debug for StaticSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSession")
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl SessionProvider for StaticSession {
    fn credential(&self) -> Option<String> {
        self.token.clone()
    }

    fn on_auth_failure(&self, handler: AuthFailureHandler) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    fn notify_auth_failure(&self, status: Option<u16>) {
        let handlers = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        warn!(
            "Authentication failure ({:?}), notifying {} handler(s)",
            status,
            handlers.len()
        );
        for handler in handlers {
            handler(status);
        }
        debug!("Auth failure handlers done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_token_structure() {
        assert!(is_well_formed_token("aaa.bbb.ccc"));
        assert!(!is_well_formed_token("aaa.bbb"));
        assert!(!is_well_formed_token("aaa..ccc"));
        assert!(!is_well_formed_token(""));
        assert!(!is_well_formed_token("a.b.c.d"));
    }

    #[test]
    fn test_blank_token_is_no_credential() {
        assert_eq!(StaticSession::new(Some("  ".into())).credential(), None);
        assert_eq!(
            StaticSession::new(Some("x.y.z".into())).credential().as_deref(),
            Some("x.y.z")
        );
    }

    #[test]
    fn test_handlers_are_notified() {
        let session = StaticSession::new(None);
        let calls = Arc::new(AtomicU32::new(0));
        let seen = calls.clone();
        session.on_auth_failure(Arc::new(move |status| {
            assert_eq!(status, Some(401));
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        session.notify_auth_failure(Some(401));
        session.notify_auth_failure(Some(401));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
