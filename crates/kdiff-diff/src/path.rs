//! Locations inside a document tree.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step from a node to one of its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// A mapping key.
    Key(String),
    /// A list position.
    Index(usize),
    /// An element of an identity list, e.g. `container[nginx]`.
    Identity { label: String, id: String },
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{key}"),
            Segment::Index(i) => write!(f, "[{i}]"),
            Segment::Identity { label, id } => write!(f, "{label}[{id}]"),
        }
    }
}

/// The location of a value relative to the root of the compared object.
///
/// Paths only give context to events (where to indent, what to print as a
/// label); they play no part in matching values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        self.child(Segment::Key(key.to_string()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    pub fn identity(&self, label: &str, id: &str) -> Self {
        self.child(Segment::Identity {
            label: label.to_string(),
            id: id.to_string(),
        })
    }

    fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Number of segments; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Dotted notation: `spec.containers.container[nginx].ports[0]`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && !matches!(segment, Segment::Index(_)) {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty() {
        assert_eq!(Path::root().depth(), 0);
        assert_eq!(Path::root().to_string(), "");
        assert!(Path::root().last().is_none());
    }

    #[test]
    fn dotted_display() {
        let path = Path::root()
            .key("spec")
            .key("containers")
            .identity("container", "nginx")
            .key("ports")
            .index(0)
            .key("containerPort");
        assert_eq!(
            path.to_string(),
            "spec.containers.container[nginx].ports[0].containerPort"
        );
        assert_eq!(path.depth(), 6);
    }

    #[test]
    fn children_do_not_alias_parent() {
        let parent = Path::root().key("spec");
        let child = parent.key("replicas");
        assert_eq!(parent.depth(), 1);
        assert_eq!(child.last(), Some(&Segment::Key("replicas".into())));
    }

    #[test]
    fn serializes_as_string() {
        let path = Path::root().key("metadata").key("labels");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"metadata.labels\"");
    }
}
