//! Single-line rendering of values for annotations.

use kdiff_types::Node;
use tracing::debug;

/// Appended when a rendering had to be cut to its first line.
pub const TRUNCATION_MARKER: &str = " ...";

/// Render a node as one line of YAML.
///
/// Multi-line renderings keep their first line followed by
/// [`TRUNCATION_MARKER`]. If YAML serialization fails the node's flow-style
/// `Display` form is used instead; this function never fails.
pub fn format_value(node: &Node) -> String {
    let rendered = match serde_yaml::to_string(node) {
        Ok(rendered) => rendered,
        Err(e) => {
            debug!(error = %e, "yaml rendering failed, using display form");
            node.to_string()
        }
    };
    let rendered = rendered.trim();
    match rendered.split_once('\n') {
        Some((first, _)) => format!("{}{TRUNCATION_MARKER}", first.trim_end()),
        None => rendered.to_string(),
    }
}
