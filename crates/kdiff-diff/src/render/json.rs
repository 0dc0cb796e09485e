use std::io::Write;

use crate::error::DiffResult;
use crate::event::{DiffEvent, DiffSink};

/// Writes one JSON object per event, newline-delimited.
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<'a, W: Write> DiffSink<'a> for JsonRenderer<W> {
    fn emit(&mut self, event: DiffEvent<'a>) -> DiffResult<()> {
        serde_json::to_writer(&mut self.out, &event)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Differ;
    use crate::path::Path;
    use kdiff_types::Node;
    use serde_json::{json, Value};

    fn lines(a: &Node, b: &Node) -> Vec<Value> {
        let mut renderer = JsonRenderer::new(Vec::new());
        Differ::default().diff(&Path::root(), a, b, &mut renderer).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        out.lines().map(|line| serde_json::from_str(line).unwrap()).collect()
    }

    #[test]
    fn one_object_per_line() {
        let a = Node::from(json!({"replicas": 1, "old": true}));
        let b = Node::from(json!({"replicas": 2}));
        let lines = lines(&a, &b);
        assert_eq!(
            lines,
            vec![
                json!({"event": "removed", "path": "old", "value": true}),
                json!({"event": "nested", "path": "replicas"}),
                json!({"event": "modified", "path": "replicas", "old": 1, "new": 2}),
            ]
        );
    }

    #[test]
    fn structural_events_carry_identity_and_taint() {
        let a = Node::from(json!({"containers": [{"name": "app", "image": "a"}]}));
        let b = Node::from(json!({"containers": [
            {"name": "app", "image": "a"},
            {"name": "proxy", "image": "envoy"}
        ]}));
        let lines = lines(&a, &b);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["event"], "structural_addition");
        assert_eq!(lines[1]["path"], "containers.container[proxy]");
        assert_eq!(lines[1]["identity"], "proxy");
        assert_eq!(lines[1]["tainted"], true);
        assert_eq!(lines[1]["value"], json!({"image": "envoy", "name": "proxy"}));
    }

    #[test]
    fn equal_values_write_nothing() {
        let a = Node::from(json!({"a": [1, 2]}));
        assert!(lines(&a, &a.clone()).is_empty());
    }
}
