//! Manifest loading for kdiff.
//!
//! Turns raw multi-document YAML into validated [`KubeObject`]s, each carrying
//! the [`ObjectKey`] used to match objects across two manifests.
//!
//! # Key Types
//!
//! - [`KubeObject`] -- A validated top-level resource split into its diffed sections
//! - [`ObjectKey`] -- `kind/name` or `kind/namespace/name` identity
//! - [`Document`] -- One decoded document of a YAML stream
//! - [`ManifestError`] -- Decoding and validation failures

pub mod error;
pub mod object;
pub mod parse;

pub use error::{ManifestError, ObjectRef, Result};
pub use object::{KubeObject, ObjectKey, DEFAULT_NAMESPACE};
pub use parse::{parse_documents, parse_objects, Document};
