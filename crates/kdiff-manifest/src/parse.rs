//! Multi-document YAML decoding.

use kdiff_types::Node;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ManifestError, Result};
use crate::object::KubeObject;

/// One non-empty document of a YAML stream.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// 1-based position in the stream, counting empty documents too.
    pub index: usize,
    pub node: Node,
}

/// Decode every `---`-separated document of `text`.
///
/// Empty documents (nothing but whitespace or comments) are skipped but still
/// count towards the numbering used in error messages.
pub fn parse_documents(text: &str) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for (i, de) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let index = i + 1;
        let value = serde_yaml::Value::deserialize(de)
            .map_err(|source| ManifestError::Yaml { index, source })?;
        if value.is_null() {
            continue;
        }
        let node = Node::from_yaml(value).map_err(|source| ManifestError::Node { index, source })?;
        documents.push(Document { index, node });
    }
    debug!(documents = documents.len(), "decoded manifest");
    Ok(documents)
}

/// Decode and validate every object of a manifest.
pub fn parse_objects(text: &str) -> Result<Vec<KubeObject>> {
    parse_documents(text)?
        .into_iter()
        .map(|doc| KubeObject::from_node(doc.node, doc.index))
        .collect()
}
