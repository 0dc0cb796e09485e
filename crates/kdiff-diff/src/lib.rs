//! Semantic diff engine for kdiff.
//!
//! Walks two decoded document trees value by value and streams annotated
//! [`DiffEvent`]s into a [`DiffSink`]. Mappings are compared key by key,
//! lists either by position or, when their elements carry a name-like
//! identity, by that identity.
//!
//! # Key Types
//!
//! - [`Differ`] / [`Strategy`] -- Recursive dispatch over node shapes
//! - [`IdentityRule`] -- Which lists are matched by element identity
//! - [`DiffEvent`] / [`DiffSink`] -- Streamed report lines and their consumer
//! - [`render_report`] / [`ReportStats`] -- Object-set comparison of two manifests
//! - [`TextRenderer`] / [`JsonRenderer`] / [`Palette`] -- Event output

pub mod engine;
pub mod equality;
pub mod error;
pub mod event;
pub mod format;
pub mod identity;
pub mod path;
pub mod render;
pub mod report;

pub use engine::{Differ, Strategy};
pub use equality::deep_equal;
pub use error::{DiffError, DiffResult};
pub use event::{DiffEvent, DiffSink};
pub use format::{format_value, TRUNCATION_MARKER};
pub use identity::IdentityRule;
pub use path::{Path, Segment};
pub use render::{JsonRenderer, Palette, PlainPalette, TextRenderer, Tone};
pub use report::{render_report, ReportStats};
