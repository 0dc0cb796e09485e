//! Document nodes and their conversions from decoded YAML and JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value as Yaml;

use crate::error::TypeError;
use crate::scalar::Scalar;

/// Mapping entries, kept sorted by key.
pub type Mapping = BTreeMap<String, Node>;

/// An empty mapping, used as the stand-in for an absent section.
pub static EMPTY_MAPPING: Node = Node::Mapping(BTreeMap::new());

/// One decoded unit of a document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    List(Vec<Node>),
    Scalar(Scalar),
}

/// The shape of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Mapping,
    List,
    Scalar,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Mapping => write!(f, "mapping"),
            NodeKind::List => write!(f, "list"),
            NodeKind::Scalar => write!(f, "scalar"),
        }
    }
}

impl Node {
    /// The null scalar.
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    /// A string scalar.
    pub fn string(s: impl Into<String>) -> Self {
        Node::Scalar(Scalar::String(s.into()))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Mapping(_) => NodeKind::Mapping,
            Node::List(_) => NodeKind::List,
            Node::Scalar(_) => NodeKind::Scalar,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// The string payload, if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => s.as_str(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    /// Look up a key when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Convert a decoded YAML value into a node.
    ///
    /// Tags are dropped in favor of the tagged value. Scalar mapping keys are
    /// stringified (`1: x` becomes the key `"1"`); sequence and mapping keys
    /// are rejected, as are keys that collide once stringified.
    pub fn from_yaml(value: Yaml) -> Result<Self, TypeError> {
        Ok(match value {
            Yaml::Null => Node::null(),
            Yaml::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Yaml::Number(n) => Node::Scalar(number_scalar(n.as_i64(), n.as_u64(), n.as_f64())),
            Yaml::String(s) => Node::string(s),
            Yaml::Sequence(items) => Node::List(
                items
                    .into_iter()
                    .map(Node::from_yaml)
                    .collect::<Result<_, _>>()?,
            ),
            Yaml::Mapping(entries) => {
                let mut map = Mapping::new();
                for (key, value) in entries {
                    let key = key_from_yaml(key)?;
                    if map.contains_key(&key) {
                        return Err(TypeError::DuplicateKey { key });
                    }
                    map.insert(key, Node::from_yaml(value)?);
                }
                Node::Mapping(map)
            }
            Yaml::Tagged(tagged) => Node::from_yaml(tagged.value)?,
        })
    }
}

fn number_scalar(int: Option<i64>, uint: Option<u64>, float: Option<f64>) -> Scalar {
    match (int, uint, float) {
        (Some(i), _, _) => Scalar::Int(i),
        (None, Some(u), _) => Scalar::UInt(u),
        (None, None, Some(x)) => Scalar::Float(x),
        (None, None, None) => Scalar::Null,
    }
}

fn key_from_yaml(key: Yaml) -> Result<String, TypeError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Tagged(tagged) => key_from_yaml(tagged.value),
        Yaml::Sequence(_) => Err(TypeError::UnsupportedKey { kind: "sequence" }),
        Yaml::Mapping(_) => Err(TypeError::UnsupportedKey { kind: "mapping" }),
        scalar => Ok(Node::from_yaml(scalar)?.to_string()),
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Json::Null => Node::null(),
            Json::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Json::Number(n) => Node::Scalar(number_scalar(n.as_i64(), n.as_u64(), n.as_f64())),
            Json::String(s) => Node::string(s),
            Json::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            Json::Object(entries) => Node::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Node::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Node::List(items) => serializer.collect_seq(items),
            Node::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Yaml::deserialize(deserializer)?;
        Node::from_yaml(value).map_err(D::Error::custom)
    }
}

/// Flow-style rendering (`{a: 1, b: [x, y]}`), used when YAML serialization
/// is unavailable.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(scalar) => write!(f, "{scalar}"),
            Node::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Node::Mapping(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
