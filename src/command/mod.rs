//! Command orchestration
//!
//! `ImageSearchCommand` wires the search API, the image fetcher, the grid
//! compositor, and the reply correlator together behind two entry points:
//! [`handle_invocation`](ImageSearchCommand::handle_invocation) for a fresh
//! command and [`handle_reply`](ImageSearchCommand::handle_reply) for every
//! reply the host correlates back to one of our messages.
//!
//! # Module Structure
//!
//! - `entry` - Query parsing, direct-send mode, page rendering
//! - `reply` - The "next"/ordinal reply state machine

mod entry;
mod reply;

use crate::canvas::GridCompositor;
use crate::error::Result;
use crate::fetch::FetchUrl;
use crate::search::SearchApi;
use crate::session::ReplyCorrelator;
use crate::types::config::SearchConfig;
use crate::types::identifiers::{MessageId, UserId};
use crate::types::outbound::OutgoingMessage;

/// Outbound delivery seam implemented by the host platform adapter
pub trait Messenger {
    /// Deliver `message` and return the platform's ID for it
    fn send(
        &self,
        message: OutgoingMessage,
    ) -> impl std::future::Future<Output = Result<MessageId>> + Send;
}

impl<M: Messenger + Send + Sync> Messenger for std::sync::Arc<M> {
    async fn send(&self, message: OutgoingMessage) -> Result<MessageId> {
        (**self).send(message).await
    }
}

/// A fresh command invocation from the host
#[derive(Debug, Clone)]
pub struct Invocation {
    /// User who issued the command
    pub sender: UserId,
    /// Raw argument text, possibly carrying a `-<count>` flag
    pub text: String,
}

/// A reply the host correlated back to one of our messages
#[derive(Debug, Clone)]
pub struct IncomingReply {
    /// User who replied
    pub sender: UserId,
    /// Message the user replied to
    pub replied_to: MessageId,
    /// Reply text
    pub text: String,
}

/// The conversational image search feature
pub struct ImageSearchCommand<S, F, M, C> {
    pub(crate) config: SearchConfig,
    pub(crate) search: S,
    pub(crate) fetcher: F,
    pub(crate) messenger: M,
    pub(crate) correlator: C,
    pub(crate) compositor: GridCompositor,
}

impl<S, F, M, C> ImageSearchCommand<S, F, M, C>
where
    S: SearchApi,
    F: FetchUrl,
    M: Messenger,
    C: ReplyCorrelator,
{
    /// Assemble the feature from its collaborators
    pub fn new(config: SearchConfig, search: S, fetcher: F, messenger: M, correlator: C) -> Self {
        let compositor = GridCompositor::new(&config);
        Self {
            config,
            search,
            fetcher,
            messenger,
            correlator,
            compositor,
        }
    }

    pub(crate) async fn send_text(&self, body: &str) -> Result<MessageId> {
        self.messenger.send(OutgoingMessage::text(body)).await
    }
}
