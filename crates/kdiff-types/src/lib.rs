//! Value model for kdiff.
//!
//! A decoded manifest is a tree of [`Node`]s: mappings, ordered lists and
//! scalars. Nodes are built once by decoding and never mutated afterwards;
//! everything downstream (validation, diffing, rendering) only reads them.
//!
//! # Key Types
//!
//! - [`Node`] -- Mapping, list or scalar
//! - [`Scalar`] -- Leaf values (null, bool, integer, float, string)
//! - [`NodeKind`] -- Shape of a node, used for dispatch and diagnostics

pub mod error;
pub mod node;
pub mod scalar;

pub use error::TypeError;
pub use node::{Mapping, Node, NodeKind, EMPTY_MAPPING};
pub use scalar::Scalar;
