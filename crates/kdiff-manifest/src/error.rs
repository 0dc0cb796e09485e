//! Error types for manifest loading.

use std::fmt;

use kdiff_types::TypeError;
use thiserror::Error;

/// Points at one object of a manifest for error messages.
///
/// Renders as `object 2`, `object 2 (Pod)` or `object 2 (Pod/web)` depending
/// on how much of the object was readable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    /// 1-based position of the document in the stream.
    pub index: usize,
    pub kind: Option<String>,
    pub name: Option<String>,
}

impl ObjectRef {
    pub fn new(index: usize) -> Self {
        Self { index, kind: None, name: None }
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object {}", self.index)?;
        match (&self.kind, &self.name) {
            (Some(kind), Some(name)) => write!(f, " ({kind}/{name})"),
            (Some(kind), None) => write!(f, " ({kind})"),
            _ => Ok(()),
        }
    }
}

/// Errors that can occur while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The YAML text of a document could not be decoded.
    #[error("failed to parse object {index}: {source}")]
    Yaml {
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document decoded but could not be represented as a node tree.
    #[error("failed to parse object {index}: {source}")]
    Node {
        index: usize,
        #[source]
        source: TypeError,
    },

    /// The document root is not a mapping.
    #[error("object {index}: expected a mapping at the document root, got {actual}")]
    NotAMapping { index: usize, actual: String },

    /// A required field is absent.
    #[error("{object}: missing required field '{field}'")]
    MissingField { object: ObjectRef, field: &'static str },

    /// A field is present but has the wrong shape.
    #[error("{object}: '{field}' must be {expected}, got {actual}")]
    InvalidField {
        object: ObjectRef,
        field: &'static str,
        expected: &'static str,
        actual: String,
    },
}

/// Convenience type alias for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ref_display() {
        assert_eq!(ObjectRef::new(3).to_string(), "object 3");
        assert_eq!(ObjectRef::new(3).with_kind("Pod").to_string(), "object 3 (Pod)");
        assert_eq!(
            ObjectRef::new(3).with_kind("Pod").with_name("web").to_string(),
            "object 3 (Pod/web)"
        );
    }

    #[test]
    fn missing_field_message() {
        let err = ManifestError::MissingField {
            object: ObjectRef::new(1),
            field: "apiVersion",
        };
        assert_eq!(err.to_string(), "object 1: missing required field 'apiVersion'");
    }
}
