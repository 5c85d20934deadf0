//! # imgscout
//!
//! Conversational image search for chat bots: one free-text query fetches a
//! batch of image URLs from a remote search API, lays them out into a
//! paginated masonry grid canvas, and lets the user page through or pick an
//! image purely by replying to the bot's message with text (`next` or a
//! number).
//!
//! There is no button UI and no persistent session store. All interaction
//! state rides in an opaque blob attached to the outgoing message through a
//! [`ReplyCorrelator`], and is rebuilt from scratch on every incoming reply.
//!
//! ## Quick Start
//!
//! ```no_run
//! use imgscout::{
//!     HttpFetcher, HttpSearchClient, ImageSearchCommand, InMemoryCorrelator, Invocation,
//!     SearchConfig, UserId,
//! };
//!
//! # use imgscout::{Messenger, MessageId, OutgoingMessage};
//! # struct MyPlatform;
//! # impl Messenger for MyPlatform {
//! #     async fn send(&self, _m: OutgoingMessage) -> imgscout::Result<MessageId> {
//! #         Ok(MessageId::new("1"))
//! #     }
//! # }
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SearchConfig::builder()
//!         .api_endpoint("https://example.com/api/pin")
//!         .build()?;
//!
//!     let command = ImageSearchCommand::new(
//!         config.clone(),
//!         HttpSearchClient::new(&config)?,
//!         HttpFetcher::new(&config)?,
//!         MyPlatform, // your platform adapter implementing Messenger
//!         InMemoryCorrelator::new(config.session_ttl(), config.sweep_interval()),
//!     );
//!
//!     command
//!         .handle_invocation(Invocation {
//!             sender: UserId::new("user-42"),
//!             text: "fluffy cats".to_string(),
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! When the host sees a reply to one of the bot's messages, it forwards it
//! as an [`IncomingReply`] to
//! [`handle_reply`](ImageSearchCommand::handle_reply); everything else
//! (transport, auth, threading, command registration) stays on the host's
//! side of the [`Messenger`] seam.
//!
//! ## Architecture
//!
//! - [`types`]: Identifiers, configuration, outbound message types
//! - [`search`]: Search API client behind the [`SearchApi`] trait
//! - [`fetch`]: URL-to-bytes resolution behind the [`FetchUrl`] trait
//! - [`canvas`]: Masonry layout and the grid compositor
//! - [`session`]: Session state, paging math, reply correlation
//! - [`command`]: The invocation and reply orchestrators
//! - [`error`]: Error types and handling
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, ScoutError>`](Result). Per-item
//! failures (one image failing to fetch or decode) are contained where they
//! happen; only batch-level failures surface, and every failure path ends in
//! a user-facing notice or a silent no-op, never a panic across this crate's
//! boundary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canvas;
pub mod command;
pub mod error;
pub mod fetch;
pub mod search;
pub mod session;
pub mod types;

// Re-export commonly used types for external API
pub use canvas::{Candidate, GridCompositor, RenderedGrid};
pub use command::{ImageSearchCommand, IncomingReply, Invocation, Messenger};
pub use error::{Result, ScoutError};
pub use fetch::{FetchUrl, HttpFetcher};
pub use search::{HttpSearchClient, SearchApi};
pub use session::{InMemoryCorrelator, PageSpec, ReplyCorrelator, SessionState};
pub use types::config::{SearchConfig, SearchConfigBuilder};
pub use types::identifiers::{MessageId, UserId};
pub use types::outbound::{Attachment, OutgoingMessage};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
