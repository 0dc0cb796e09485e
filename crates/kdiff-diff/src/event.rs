//! Diff events and the sinks that consume them.

use kdiff_manifest::ObjectKey;
use kdiff_types::Node;
use serde::Serialize;

use crate::error::DiffResult;
use crate::path::Path;

/// One line of a diff report, borrowing the compared values.
///
/// Every event that concerns a value carries that value's [`Path`]. Events
/// with a label (a mapping key, list index or element identity) take it from
/// the last path segment; a keyless [`DiffEvent::Modified`] is a whole-value
/// replacement printed one level deeper than the label that introduced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiffEvent<'a> {
    /// An object exists only in the old manifest.
    ObjectRemoved { object: &'a ObjectKey },
    /// An object exists only in the new manifest.
    ObjectAdded { object: &'a ObjectKey },
    /// Start of the comparison of an object present on both sides.
    ObjectHeader { object: &'a ObjectKey },
    /// A top-level section of an object whose content differs.
    Section { path: Path },
    /// A value that is identical on both sides.
    Unchanged { path: Path, value: &'a Node },
    /// A mapping key present only on the new side.
    Added { path: Path, value: &'a Node },
    /// A mapping key present only on the old side.
    Removed { path: Path, value: &'a Node },
    /// Header for a child that differs on both sides; the events describing
    /// the difference follow.
    Nested { path: Path },
    /// A value replaced as a whole. `key` is set when the replacement is
    /// printed together with its field name.
    Modified {
        path: Path,
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<&'a str>,
        old: &'a Node,
        new: &'a Node,
    },
    /// An identity-list element present only on the new side.
    StructuralAddition {
        path: Path,
        identity: &'a str,
        value: &'a Node,
        tainted: bool,
    },
    /// An identity-list element present only on the old side.
    StructuralRemoval {
        path: Path,
        identity: &'a str,
        value: &'a Node,
        tainted: bool,
    },
}

impl DiffEvent<'_> {
    /// The path of the value this event is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            DiffEvent::ObjectRemoved { .. }
            | DiffEvent::ObjectAdded { .. }
            | DiffEvent::ObjectHeader { .. } => None,
            DiffEvent::Section { path }
            | DiffEvent::Unchanged { path, .. }
            | DiffEvent::Added { path, .. }
            | DiffEvent::Removed { path, .. }
            | DiffEvent::Nested { path }
            | DiffEvent::Modified { path, .. }
            | DiffEvent::StructuralAddition { path, .. }
            | DiffEvent::StructuralRemoval { path, .. } => Some(path),
        }
    }

    /// Returns `true` for events that report a difference rather than
    /// context (headers and unchanged values).
    pub fn is_change(&self) -> bool {
        !matches!(
            self,
            DiffEvent::ObjectHeader { .. }
                | DiffEvent::Section { .. }
                | DiffEvent::Unchanged { .. }
                | DiffEvent::Nested { .. }
        )
    }
}

/// Receives events in traversal order.
pub trait DiffSink<'a> {
    fn emit(&mut self, event: DiffEvent<'a>) -> DiffResult<()>;
}

/// Collects events in memory.
impl<'a> DiffSink<'a> for Vec<DiffEvent<'a>> {
    fn emit(&mut self, event: DiffEvent<'a>) -> DiffResult<()> {
        self.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vec_collects_in_order() {
        let value = Node::from(json!(1));
        let mut events = Vec::new();
        events
            .emit(DiffEvent::Nested { path: Path::root().key("a") })
            .unwrap();
        events
            .emit(DiffEvent::Added { path: Path::root().key("a").key("b"), value: &value })
            .unwrap();
        assert_eq!(events.len(), 2);
        assert!(!events[0].is_change());
        assert!(events[1].is_change());
        assert_eq!(events[1].path().map(ToString::to_string), Some("a.b".to_string()));
    }

    #[test]
    fn serializes_with_event_tag() {
        let old = Node::from(json!("nginx:1.21"));
        let new = Node::from(json!("nginx:1.22"));
        let event = DiffEvent::Modified {
            path: Path::root().key("spec").key("image"),
            key: None,
            old: &old,
            new: &new,
        };
        let encoded = serde_json::to_value(&event).unwrap();
        assert_eq!(
            encoded,
            json!({
                "event": "modified",
                "path": "spec.image",
                "old": "nginx:1.21",
                "new": "nginx:1.22"
            })
        );
    }
}
