//! Core type definitions
//!
//! - `identifiers` - Newtype wrappers for host platform IDs
//! - `config` - Feature configuration and builder
//! - `outbound` - Messages and attachments handed to the host

pub mod config;
pub mod identifiers;
pub mod outbound;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use identifiers::{MessageId, UserId};
pub use outbound::{Attachment, OutgoingMessage};
