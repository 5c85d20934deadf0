//! Outbound message types
//!
//! The core never talks to the messaging platform directly; it hands
//! `OutgoingMessage` values to the host's [`Messenger`](crate::command::Messenger)
//! implementation. Attachments are in-memory buffers, so nothing the core
//! produces ever touches disk.

/// A binary attachment bundled with an outgoing message
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Suggested filename for the attachment
    pub filename: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Create a new attachment
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// A message the core asks the host to deliver
#[derive(Debug, Clone, Default)]
pub struct OutgoingMessage {
    /// Message body text
    pub body: String,
    /// Zero or more binary attachments
    pub attachments: Vec<Attachment>,
}

impl OutgoingMessage {
    /// Create a plain text message
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            attachments: Vec::new(),
        }
    }

    /// Create a message with a single attachment
    pub fn with_attachment(body: impl Into<String>, attachment: Attachment) -> Self {
        Self {
            body: body.into(),
            attachments: vec![attachment],
        }
    }

    /// Create a message bundling several attachments
    pub fn with_attachments(body: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            body: body.into(),
            attachments,
        }
    }
}
