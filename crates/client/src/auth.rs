//! Auth seams for the HTTP transport
//!
//! The facade never owns credentials. It reads the current token through a
//! [`TokenProvider`] immediately before each request and reports expired
//! sessions through a [`SessionGuard`]; both are injected at composition
//! time so tests and hosts can substitute their own stores.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, info};

/// Source of the current bearer token.
///
/// Consulted on every request, never cached by the client, so a token
/// change is visible on the next request without rebuilding anything.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// The current token, or `None` when no user is signed in
    async fn bearer_token(&self) -> Option<String>;
}

/// Receiver for the global 401 side effect.
///
/// Implementations clear auth state and force navigation to the login
/// entry point. Must be idempotent: every 401 re-notifies, and concurrent
/// requests that all 401 will call this once each.
#[async_trait]
pub trait SessionGuard: Send + Sync {
    async fn session_expired(&self);
}

type ExpiryHook = Box<dyn Fn() + Send + Sync>;

/// In-memory token store implementing both auth seams.
///
/// `session_expired` clears the token and runs the expiry hook (the host's
/// redirect-to-login) only when a token was actually present, so N
/// concurrent 401s produce exactly one observable logout per sign-in.
#[derive(Default)]
pub struct MemorySession {
    token: Mutex<Option<String>>,
    on_expired: Option<ExpiryHook>,
    expirations: AtomicUsize,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a hook invoked when the session is invalidated
    pub fn with_expiry_hook(hook: impl Fn() + Send + Sync + 'static) -> Self {
        Self { on_expired: Some(Box::new(hook)), ..Self::default() }
    }

    /// Store a token after sign-in
    pub fn sign_in(&self, token: impl Into<String>) {
        *self.token.lock().expect("token mutex poisoned") = Some(token.into());
    }

    /// Drop the token without treating it as an expiry
    pub fn sign_out(&self) {
        *self.token.lock().expect("token mutex poisoned") = None;
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.lock().expect("token mutex poisoned").is_some()
    }

    /// How many times the session has actually been invalidated
    pub fn expiration_count(&self) -> usize {
        self.expirations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenProvider for MemorySession {
    async fn bearer_token(&self) -> Option<String> {
        self.token.lock().expect("token mutex poisoned").clone()
    }
}

#[async_trait]
impl SessionGuard for MemorySession {
    async fn session_expired(&self) {
        let cleared = {
            let mut token = self.token.lock().expect("token mutex poisoned");
            token.take().is_some()
        };

        if cleared {
            info!("session expired, clearing auth state");
            self.expirations.fetch_add(1, Ordering::SeqCst);
            if let Some(hook) = &self.on_expired {
                hook();
            }
        } else {
            // already cleared by an earlier 401; nothing left to invalidate
            debug!("session already cleared");
        }
    }
}
