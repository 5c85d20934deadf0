//! Search session state and reply correlation
//!
//! - `state` - Session blob, page specs, and paging math
//! - `correlator` - Message-to-session association with TTL eviction

mod correlator;
mod state;

pub use correlator::{InMemoryCorrelator, ReplyCorrelator};
pub use state::{PageSpec, SessionState, page_slice, total_pages};
