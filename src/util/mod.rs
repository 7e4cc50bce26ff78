//! Unicode-aware text helpers for terminal rendering.

mod text;

pub use text::{display_width, preview_line, truncate_to_width};
