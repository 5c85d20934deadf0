//! Masonry grid canvas
//!
//! - `layout` - Column height accumulator and tile placement
//! - `text` - Bitmap text and rectangle primitives
//! - `compose` - Page renderer producing PNG bytes and the displayed map

mod compose;
mod layout;
mod text;

pub use compose::{Candidate, GridCompositor, RenderedGrid};
pub use layout::{MasonryLayout, Placement};
