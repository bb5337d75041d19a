//! Recorded draw stream.
//!
//! Responsibilities:
//! - capture canvas calls as renderer-agnostic commands
//! - keep the paint as it was at record time, so later paint mutation by
//!   the drawable does not leak into recorded commands

mod cmd;
mod list;

pub use cmd::{DrawCmd, GlyphCmd};
pub use list::DrawList;
