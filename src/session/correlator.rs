//! Reply correlation
//!
//! Associates an outgoing message with the session state needed to interpret
//! replies to it. The core only ever consumes the [`ReplyCorrelator`] trait;
//! [`InMemoryCorrelator`] is the bundled keyed store with TTL eviction so
//! abandoned sessions cannot grow memory without bound.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::state::SessionState;
use crate::types::identifiers::MessageId;

/// Keyed association from message identity to session state
///
/// `attach` replaces any existing binding for the message wholesale. A
/// `lookup` miss means the reply targets a message with no live session
/// (never bound, superseded, expired, or consumed) and is treated as a
/// silent no-op by the reply handler.
pub trait ReplyCorrelator {
    /// Bind `state` to `message`, replacing any previous binding
    fn attach(
        &self,
        message: MessageId,
        state: SessionState,
    ) -> impl std::future::Future<Output = ()> + Send;

    /// Fetch the state bound to `message`, if a live binding exists
    fn lookup(
        &self,
        message: &MessageId,
    ) -> impl std::future::Future<Output = Option<SessionState>> + Send;

    /// Drop the binding for `message`, if any
    fn invalidate(&self, message: &MessageId) -> impl std::future::Future<Output = ()> + Send;
}

impl<C: ReplyCorrelator + Send + Sync> ReplyCorrelator for Arc<C> {
    async fn attach(&self, message: MessageId, state: SessionState) {
        (**self).attach(message, state).await;
    }

    async fn lookup(&self, message: &MessageId) -> Option<SessionState> {
        (**self).lookup(message).await
    }

    async fn invalidate(&self, message: &MessageId) {
        (**self).invalidate(message).await;
    }
}

struct Binding {
    state: SessionState,
    expires_at: Instant,
}

type BindingMap = Arc<Mutex<HashMap<MessageId, Binding>>>;

/// In-memory [`ReplyCorrelator`] with background TTL eviction
pub struct InMemoryCorrelator {
    bindings: BindingMap,
    ttl: Duration,
    sweep_handle: Option<tokio::task::JoinHandle<()>>,
}

impl InMemoryCorrelator {
    /// Create a correlator and spawn its eviction sweep task.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        let bindings: BindingMap = Arc::new(Mutex::new(HashMap::new()));

        let sweep_clone = Arc::clone(&bindings);
        let sweep_handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(sweep_interval).await;
                let mut map = sweep_clone.lock().await;
                let before = map.len();
                let now = Instant::now();
                map.retain(|_, binding| binding.expires_at > now);
                if map.len() < before {
                    log::debug!("evicted {} expired session binding(s)", before - map.len());
                }
            }
        });

        Self {
            bindings,
            ttl,
            sweep_handle: Some(sweep_handle),
        }
    }

    /// Number of live bindings, for host diagnostics
    pub async fn len(&self) -> usize {
        self.bindings.lock().await.len()
    }

    /// Whether no bindings are live
    pub async fn is_empty(&self) -> bool {
        self.bindings.lock().await.is_empty()
    }
}

impl Drop for InMemoryCorrelator {
    fn drop(&mut self) {
        if let Some(handle) = self.sweep_handle.take() {
            handle.abort();
        }
    }
}

impl ReplyCorrelator for InMemoryCorrelator {
    async fn attach(&self, message: MessageId, state: SessionState) {
        let binding = Binding {
            state,
            expires_at: Instant::now() + self.ttl,
        };
        self.bindings.lock().await.insert(message, binding);
    }

    async fn lookup(&self, message: &MessageId) -> Option<SessionState> {
        let mut map = self.bindings.lock().await;
        // expired bindings are dropped lazily too, not only by the sweep
        match map.get(message) {
            Some(binding) if binding.expires_at > Instant::now() => Some(binding.state.clone()),
            Some(_) => {
                map.remove(message);
                None
            }
            None => None,
        }
    }

    async fn invalidate(&self, message: &MessageId) {
        self.bindings.lock().await.remove(message);
    }
}
