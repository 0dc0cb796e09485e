//! Deep structural equality.

use kdiff_types::Node;

/// Returns `true` when two nodes are structurally identical.
///
/// Mapping key order never matters, list order always does, and scalars of
/// different types (`1` and `1.0`, `80` and `"80"`) are never equal. NaN
/// compares equal to NaN so a value always equals itself.
pub fn deep_equal(a: &Node, b: &Node) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mapping_order_is_irrelevant() {
        let a: Node = serde_yaml::from_str("x: 1\ny: 2\n").unwrap();
        let b: Node = serde_yaml::from_str("y: 2\nx: 1\n").unwrap();
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn list_order_matters() {
        assert!(!deep_equal(&Node::from(json!([1, 2])), &Node::from(json!([2, 1]))));
    }

    #[test]
    fn scalar_types_are_distinct() {
        assert!(!deep_equal(&Node::from(json!(1)), &Node::from(json!(1.0))));
        assert!(!deep_equal(&Node::from(json!("80")), &Node::from(json!(80))));
    }

    #[test]
    fn nested_difference_is_found() {
        let a = Node::from(json!({"a": {"b": [1, {"c": true}]}}));
        let b = Node::from(json!({"a": {"b": [1, {"c": false}]}}));
        assert!(!deep_equal(&a, &b));
        assert!(deep_equal(&a, &a.clone()));
    }
}
