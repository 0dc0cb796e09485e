//! Block-style listing of unchanged values.

use std::io::{self, Write};

use kdiff_types::Node;

use super::INDENT;

/// Write `node` as indented block YAML starting at `depth`.
///
/// Scalars under a key share its line; nested collections start on the next
/// line one level deeper. List items are introduced by a bare `-` line.
pub fn write_node<W: Write + ?Sized>(out: &mut W, depth: usize, node: &Node) -> io::Result<()> {
    let indent = INDENT.repeat(depth);
    match node {
        Node::Mapping(entries) => {
            for (key, value) in entries {
                match value {
                    Node::Scalar(scalar) => writeln!(out, "{indent}{key}: {scalar}")?,
                    _ => {
                        writeln!(out, "{indent}{key}:")?;
                        write_node(out, depth + 1, value)?;
                    }
                }
            }
        }
        Node::List(items) => {
            for item in items {
                writeln!(out, "{indent}-")?;
                write_node(out, depth + 1, item)?;
            }
        }
        Node::Scalar(scalar) => writeln!(out, "{indent}{scalar}")?,
    }
    Ok(())
}
