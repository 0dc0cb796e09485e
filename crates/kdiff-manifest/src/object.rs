//! Validated top-level objects and their identity keys.

use std::fmt;

use kdiff_types::{Node, Scalar};
use serde::{Serialize, Serializer};

use crate::error::{ManifestError, ObjectRef, Result};

/// Namespace that is treated the same as no namespace at all.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Identity of a top-level object, independent of its position in a manifest.
///
/// Ordering is by kind, then namespace, then name, which is the order objects
/// are reported in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    kind: String,
    namespace: Option<String>,
    name: String,
}

impl ObjectKey {
    /// Build a key. An empty or `default` namespace is normalized away.
    pub fn new(kind: &str, namespace: Option<&str>, name: &str) -> Self {
        let namespace = namespace
            .filter(|ns| !ns.is_empty() && *ns != DEFAULT_NAMESPACE)
            .map(str::to_string);
        Self {
            kind: kind.to_string(),
            namespace,
            name: name.to_string(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}/{}", self.kind, ns, self.name),
            None => write!(f, "{}/{}", self.kind, self.name),
        }
    }
}

impl Serialize for ObjectKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A validated top-level resource.
///
/// Only the sections the report compares are kept. `api_version` and `kind`
/// are guaranteed to be non-empty string scalars and `metadata` a mapping
/// with a non-empty string `name`.
#[derive(Clone, Debug, PartialEq)]
pub struct KubeObject {
    pub api_version: Node,
    pub kind: Node,
    pub metadata: Node,
    pub data: Option<Node>,
    pub spec: Option<Node>,
    key: ObjectKey,
}

impl KubeObject {
    /// Validate a decoded document and split it into sections.
    ///
    /// `index` is the 1-based document position, used in error messages.
    pub fn from_node(node: Node, index: usize) -> Result<Self> {
        let mut root = match node {
            Node::Mapping(root) => root,
            other => {
                return Err(ManifestError::NotAMapping {
                    index,
                    actual: describe(&other),
                })
            }
        };
        let mut object = ObjectRef::new(index);

        let api_version = required_string(root.remove("apiVersion"), &object, "apiVersion")?;
        let kind = required_string(root.remove("kind"), &object, "kind")?;
        object = object.with_kind(kind.as_str().unwrap_or_default());

        let metadata = match root.remove("metadata") {
            Some(meta @ Node::Mapping(_)) => meta,
            None | Some(Node::Scalar(Scalar::Null)) => {
                return Err(ManifestError::MissingField { object, field: "metadata" })
            }
            Some(other) => {
                return Err(ManifestError::InvalidField {
                    object,
                    field: "metadata",
                    expected: "a mapping",
                    actual: describe(&other),
                })
            }
        };

        let name = required_string(metadata.get("name").cloned(), &object, "metadata.name")?;
        let name = name.as_str().unwrap_or_default();
        object = object.with_name(name);

        let namespace = match metadata.get("namespace") {
            None => None,
            Some(ns) => match ns.as_str() {
                Some(ns) => Some(ns),
                None => {
                    return Err(ManifestError::InvalidField {
                        object,
                        field: "metadata.namespace",
                        expected: "a string",
                        actual: describe(ns),
                    })
                }
            },
        };

        let key = ObjectKey::new(kind.as_str().unwrap_or_default(), namespace, name);
        Ok(Self {
            api_version,
            kind,
            metadata,
            data: optional_section(root.remove("data")),
            spec: optional_section(root.remove("spec")),
            key,
        })
    }

    pub fn key(&self) -> &ObjectKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        self.key.name()
    }
}

fn required_string(value: Option<Node>, object: &ObjectRef, field: &'static str) -> Result<Node> {
    match value {
        None | Some(Node::Scalar(Scalar::Null)) => Err(ManifestError::MissingField {
            object: object.clone(),
            field,
        }),
        Some(node) => match node.as_str() {
            Some(s) if !s.is_empty() => Ok(node),
            _ => Err(ManifestError::InvalidField {
                object: object.clone(),
                field,
                expected: "a non-empty string",
                actual: describe(&node),
            }),
        },
    }
}

/// A null section (`spec:` with nothing under it) counts as absent.
fn optional_section(value: Option<Node>) -> Option<Node> {
    value.filter(|node| !node.is_null())
}

fn describe(node: &Node) -> String {
    match node {
        Node::Mapping(_) => "a mapping".into(),
        Node::List(_) => "a list".into(),
        Node::Scalar(Scalar::Null) => "null".into(),
        Node::Scalar(Scalar::Bool(_)) => "a boolean".into(),
        Node::Scalar(Scalar::Int(_) | Scalar::UInt(_)) => "an integer".into(),
        Node::Scalar(Scalar::Float(_)) => "a float".into(),
        Node::Scalar(Scalar::String(s)) if s.is_empty() => "an empty string".into(),
        Node::Scalar(Scalar::String(_)) => "a string".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: serde_json::Value) -> Result<KubeObject> {
        KubeObject::from_node(Node::from(value), 1)
    }

    #[test]
    fn key_without_namespace() {
        let key = ObjectKey::new("Pod", None, "web");
        assert_eq!(key.to_string(), "Pod/web");
    }

    #[test]
    fn key_with_namespace() {
        let key = ObjectKey::new("Pod", Some("kube-system"), "dns");
        assert_eq!(key.to_string(), "Pod/kube-system/dns");
        assert_eq!(key.namespace(), Some("kube-system"));
    }

    #[test]
    fn default_namespace_is_normalized() {
        assert_eq!(
            ObjectKey::new("Pod", Some("default"), "web"),
            ObjectKey::new("Pod", None, "web")
        );
        assert_eq!(
            ObjectKey::new("Pod", Some(""), "web"),
            ObjectKey::new("Pod", None, "web")
        );
    }

    #[test]
    fn keys_order_by_kind_then_name() {
        let mut keys = vec![
            ObjectKey::new("Service", None, "a"),
            ObjectKey::new("Pod", None, "b"),
            ObjectKey::new("Pod", None, "a"),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["Pod/a", "Pod/b", "Service/a"]);
    }

    #[test]
    fn valid_object_is_split_into_sections() {
        let obj = object(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "settings", "namespace": "apps"},
            "data": {"k": "v"},
            "status": {"ignored": true}
        }))
        .unwrap();
        assert_eq!(obj.key().to_string(), "ConfigMap/apps/settings");
        assert_eq!(obj.name(), "settings");
        assert_eq!(obj.api_version.as_str(), Some("v1"));
        assert!(obj.data.is_some());
        assert!(obj.spec.is_none());
    }

    #[test]
    fn null_spec_counts_as_absent() {
        let obj = object(json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": "web"},
            "spec": null
        }))
        .unwrap();
        assert!(obj.spec.is_none());
    }

    #[test]
    fn missing_api_version() {
        let err = object(json!({"kind": "Pod", "metadata": {"name": "x"}})).unwrap_err();
        assert_eq!(err.to_string(), "object 1: missing required field 'apiVersion'");
    }

    #[test]
    fn missing_kind() {
        let err = object(json!({"apiVersion": "v1", "metadata": {"name": "x"}})).unwrap_err();
        assert_eq!(err.to_string(), "object 1: missing required field 'kind'");
    }

    #[test]
    fn missing_metadata_names_the_kind() {
        let err = object(json!({"apiVersion": "v1", "kind": "Pod"})).unwrap_err();
        assert_eq!(err.to_string(), "object 1 (Pod): missing required field 'metadata'");
    }

    #[test]
    fn missing_name() {
        let err = object(json!({"apiVersion": "v1", "kind": "Pod", "metadata": {}})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "object 1 (Pod): missing required field 'metadata.name'"
        );
    }

    #[test]
    fn empty_name_is_invalid() {
        let err = object(json!({"apiVersion": "v1", "kind": "Pod", "metadata": {"name": ""}}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "object 1 (Pod): 'metadata.name' must be a non-empty string, got an empty string"
        );
    }

    #[test]
    fn numeric_name_is_invalid() {
        let err = object(json!({"apiVersion": "v1", "kind": "Pod", "metadata": {"name": 7}}))
            .unwrap_err();
        assert!(matches!(
            err,
            ManifestError::InvalidField { field: "metadata.name", .. }
        ));
    }

    #[test]
    fn non_string_namespace_is_invalid() {
        let err = object(json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": "web", "namespace": ["a"]}
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "object 1 (Pod/web): 'metadata.namespace' must be a string, got a list"
        );
    }

    #[test]
    fn non_mapping_document() {
        let err = object(json!(["a", "b"])).unwrap_err();
        assert!(matches!(err, ManifestError::NotAMapping { index: 1, .. }));
    }
}
