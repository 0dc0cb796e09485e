//! Event output: colored text for terminals and JSON lines for tools.

pub mod json;
pub mod palette;
pub mod pretty;
pub mod text;

pub use json::JsonRenderer;
pub use palette::{Palette, PlainPalette, Tone};
pub use text::TextRenderer;

/// Indentation added per nesting level.
pub const INDENT: &str = "  ";
