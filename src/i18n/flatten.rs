//! Collapses nested translation trees into single-level resources.

use crate::error::FlattenError;
use serde_json::{Map, Value};

/// A translation resource: key to leaf value, in declaration order.
pub type Resource = Map<String, Value>;

/// Flatten `tree` so every value is a leaf.
///
/// Nested objects are merged into their parent with
/// `parent + upper_first(child)`, so `{"parent": {"childValue": "x"}}` yields
/// `parentChildValue`. Arrays are leaves and are never descended into. Two
/// paths joining into the same key is a [`FlattenError::KeyCollision`].
pub fn flatten(tree: &Resource) -> Result<Resource, FlattenError> {
    let mut flat = Resource::new();

    for (key, value) in tree {
        match value {
            Value::Object(children) => {
                for (child_key, child_value) in flatten(children)? {
                    insert_unique(&mut flat, join_key(key, &child_key), child_value)?;
                }
            }
            leaf => insert_unique(&mut flat, key.clone(), leaf.clone())?,
        }
    }

    Ok(flat)
}

/// `parent` followed by `child` with its first letter upper-cased.
pub fn join_key(parent: &str, child: &str) -> String {
    let mut chars = child.chars();
    match chars.next() {
        Some(first) => {
            let mut joined = String::with_capacity(parent.len() + child.len());
            joined.push_str(parent);
            joined.extend(first.to_uppercase());
            joined.push_str(chars.as_str());
            joined
        }
        None => parent.to_string(),
    }
}

fn insert_unique(flat: &mut Resource, key: String, value: Value) -> Result<(), FlattenError> {
    if flat.contains_key(&key) {
        return Err(FlattenError::KeyCollision { key });
    }
    flat.insert(key, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn resource(value: Value) -> Resource {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_nested_key_joins_with_upper_first_letter() {
        let tree = resource(json!({"parent": {"childValue": "x"}}));
        let flat = flatten(&tree).unwrap();

        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("parentChildValue"), Some(&json!("x")));
    }

    #[test]
    fn test_deep_nesting() {
        let tree = resource(json!({"a": {"b": {"c": "deep"}}, "top": "level"}));
        let flat = flatten(&tree).unwrap();

        assert_eq!(flat.get("aBC"), Some(&json!("deep")));
        assert_eq!(flat.get("top"), Some(&json!("level")));
    }

    #[test]
    fn test_arrays_are_leaves() {
        let tree = resource(json!({"days": ["Mon", "Tue"], "menu": {"items": ["a"]}}));
        let flat = flatten(&tree).unwrap();

        assert_eq!(flat.get("days"), Some(&json!(["Mon", "Tue"])));
        assert_eq!(flat.get("menuItems"), Some(&json!(["a"])));
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let tree = resource(json!({"zeta": "z", "group": {"one": "1", "two": "2"}, "alpha": "a"}));
        let keys: Vec<_> = flatten(&tree).unwrap().keys().cloned().collect();

        assert_eq!(keys, vec!["zeta", "groupOne", "groupTwo", "alpha"]);
    }

    #[test]
    fn test_collision_is_an_error() {
        let tree = resource(json!({"parentChild": "flat", "parent": {"child": "nested"}}));
        let err = flatten(&tree).unwrap_err();

        assert_eq!(
            err,
            FlattenError::KeyCollision {
                key: "parentChild".to_string()
            }
        );
    }

    #[test]
    fn test_join_key_handles_non_ascii_and_empty() {
        assert_eq!(join_key("greeting", "élan"), "greetingÉlan");
        assert_eq!(join_key("greeting", ""), "greeting");
    }

    fn arb_tree() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            "[a-z ]{0,8}".prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 16, 4, |inner| {
            proptest::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect()))
        })
    }

    proptest! {
        #[test]
        fn prop_flatten_is_idempotent(tree in arb_tree()) {
            if let Value::Object(map) = tree {
                if let Ok(flat) = flatten(&map) {
                    prop_assert!(flat.values().all(|v| !v.is_object()));
                    prop_assert_eq!(flatten(&flat).unwrap(), flat);
                }
            }
        }
    }
}
