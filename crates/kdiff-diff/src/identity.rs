//! Identity-keyed lists: lists whose elements are records carrying a
//! name-like key, compared by that key instead of by position.

use std::collections::BTreeMap;

use kdiff_types::Node;
use serde::{Deserialize, Serialize};

/// Recognizes identity lists and extracts element identities.
///
/// With the default rule a list of container specs (`name` + `image`) is an
/// identity list whose elements are labeled `container`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityRule {
    /// Key whose string value identifies an element.
    pub name_key: String,
    /// Second key an element must carry for the list to qualify.
    pub type_key: String,
    /// Word used for elements in paths and report lines.
    pub label: String,
}

impl Default for IdentityRule {
    fn default() -> Self {
        Self {
            name_key: "name".into(),
            type_key: "image".into(),
            label: "container".into(),
        }
    }
}

impl IdentityRule {
    /// Returns `true` if `items` looks like an identity list: it is non-empty
    /// and its first element is a mapping carrying both recognized keys.
    ///
    /// Later elements are not inspected here; [`IdentityRule::index`] checks
    /// them before the list is actually compared by identity.
    pub fn is_identity_list(&self, items: &[Node]) -> bool {
        items
            .first()
            .and_then(Node::as_mapping)
            .is_some_and(|first| {
                first.contains_key(&self.name_key) && first.contains_key(&self.type_key)
            })
    }

    /// The identity of one element: the string under `name_key`.
    pub fn identity_of<'a>(&self, item: &'a Node) -> Option<&'a str> {
        item.get(&self.name_key).and_then(Node::as_str)
    }

    /// Map every element of `items` by identity.
    ///
    /// Returns `None` when any element has no string identity or when an
    /// identity repeats, in which case the list cannot be reconciled by
    /// identity without losing elements.
    pub fn index<'a>(&self, items: &'a [Node]) -> Option<BTreeMap<&'a str, &'a Node>> {
        let mut by_identity = BTreeMap::new();
        for item in items {
            let id = self.identity_of(item)?;
            if by_identity.insert(id, item).is_some() {
                return None;
            }
        }
        Some(by_identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list(value: serde_json::Value) -> Vec<Node> {
        match Node::from(value) {
            Node::List(items) => items,
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn containers_are_identity_lists() {
        let rule = IdentityRule::default();
        let items = list(json!([{"name": "nginx", "image": "nginx:1.21"}]));
        assert!(rule.is_identity_list(&items));
    }

    #[test]
    fn empty_list_is_not_an_identity_list() {
        assert!(!IdentityRule::default().is_identity_list(&[]));
    }

    #[test]
    fn name_alone_is_not_enough() {
        let items = list(json!([{"name": "http", "port": 80}]));
        assert!(!IdentityRule::default().is_identity_list(&items));
    }

    #[test]
    fn scalar_elements_are_not_identity_lists() {
        let items = list(json!(["a", "b"]));
        assert!(!IdentityRule::default().is_identity_list(&items));
    }

    #[test]
    fn only_the_first_element_is_inspected() {
        let items = list(json!([{"name": "a", "image": "x"}, "stray"]));
        let rule = IdentityRule::default();
        assert!(rule.is_identity_list(&items));
        assert!(rule.index(&items).is_none());
    }

    #[test]
    fn index_maps_by_name() {
        let items = list(json!([
            {"name": "b", "image": "x"},
            {"name": "a", "image": "y"}
        ]));
        let index = IdentityRule::default().index(&items).unwrap();
        let ids: Vec<&str> = index.keys().copied().collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_identities_cannot_be_indexed() {
        let items = list(json!([
            {"name": "a", "image": "x"},
            {"name": "a", "image": "y"}
        ]));
        assert!(IdentityRule::default().index(&items).is_none());
    }

    #[test]
    fn non_string_names_cannot_be_indexed() {
        let items = list(json!([{"name": 1, "image": "x"}]));
        assert!(IdentityRule::default().index(&items).is_none());
    }

    #[test]
    fn custom_rule() {
        let rule = IdentityRule {
            name_key: "name".into(),
            type_key: "mountPath".into(),
            label: "mount".into(),
        };
        let items = list(json!([{"name": "data", "mountPath": "/data"}]));
        assert!(rule.is_identity_list(&items));
        assert!(!IdentityRule::default().is_identity_list(&items));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let rule: IdentityRule = serde_json::from_value(json!({"label": "sidecar"})).unwrap();
        assert_eq!(rule.name_key, "name");
        assert_eq!(rule.type_key, "image");
        assert_eq!(rule.label, "sidecar");
    }
}
