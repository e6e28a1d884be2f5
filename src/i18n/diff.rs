//! Per-locale overrides of the canonical function table.

use super::flatten::Resource;
use super::function::{interpolated_literal, leaf_text, list_literal, FunctionDescriptor, ValueKind};
use serde_json::Value;
use tracing::warn;

/// Descriptors from `canonical` that `target` overrides, in canonical order.
///
/// Bodies are built from the target locale's text with the canonical variable
/// names interpolated. Keys only present in `target` are ignored, and keys
/// missing from `target` are left to the inherited class. A value whose shape
/// disagrees with the canonical accessor (list vs text) is skipped.
pub fn diff(canonical: &[FunctionDescriptor], target: &Resource) -> Vec<FunctionDescriptor> {
    canonical
        .iter()
        .filter_map(|descriptor| {
            let value = target.get(&descriptor.name)?;
            match override_body(descriptor, value) {
                Some(body) => Some(descriptor.with_body(body)),
                None => {
                    warn!(
                        key = %descriptor.name,
                        "Translated value shape does not match the default locale, keeping inherited value"
                    );
                    None
                }
            }
        })
        .collect()
}

fn override_body(descriptor: &FunctionDescriptor, value: &Value) -> Option<String> {
    match (descriptor.kind, value) {
        (ValueKind::List, Value::Array(items)) => Some(list_literal(items)),
        (ValueKind::List, _) | (ValueKind::Text, Value::Array(_) | Value::Object(_)) => None,
        (ValueKind::Text, leaf) => Some(interpolated_literal(
            &leaf_text(leaf),
            &descriptor.variables,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::function::build;
    use serde_json::json;

    fn resource(value: Value) -> Resource {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_french_override_keeps_parameters() {
        let canonical = build(&resource(json!({"title": "Hello {name}"})));
        let overrides = diff(&canonical, &resource(json!({"title": "Bonjour {name}"})));

        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].name, "title");
        assert_eq!(overrides[0].signature, "String title(String name)");
        assert_eq!(overrides[0].variables, vec!["name"]);
        assert_eq!(overrides[0].body, "\"Bonjour ${name}\"");
    }

    #[test]
    fn test_keys_unknown_to_canonical_are_ignored() {
        let canonical = build(&resource(json!({"title": "Hello"})));
        let overrides = diff(
            &canonical,
            &resource(json!({"title": "Hallo", "extra": "Nur hier"})),
        );

        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].name, "title");
    }

    #[test]
    fn test_missing_keys_are_omitted() {
        let canonical = build(&resource(json!({"a": "A", "b": "B", "c": "C"})));
        let overrides = diff(&canonical, &resource(json!({"c": "Ce", "a": "Ah"})));
        let names: Vec<_> = overrides.iter().map(|f| f.name.as_str()).collect();

        // canonical order, not target order
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_list_override() {
        let canonical = build(&resource(json!({"days": ["Mon", "Tue"]})));
        let overrides = diff(&canonical, &resource(json!({"days": ["Lun", "Mar"]})));

        assert_eq!(overrides[0].body, "[\"Lun\", \"Mar\"]");
        assert_eq!(overrides[0].signature, "List<String> get days");
    }

    #[test]
    fn test_shape_mismatch_is_skipped() {
        let canonical = build(&resource(json!({"days": ["Mon"], "title": "Hi"})));
        let overrides = diff(
            &canonical,
            &resource(json!({"days": "Lundi", "title": ["Salut"]})),
        );

        assert!(overrides.is_empty());
    }

    #[test]
    fn test_diff_names_are_subset_of_canonical() {
        let canonical = build(&resource(json!({"one": "1", "two": "2"})));
        let overrides = diff(
            &canonical,
            &resource(json!({"two": "zwei", "three": "drei", "one": "eins"})),
        );

        assert!(overrides
            .iter()
            .all(|o| canonical.iter().any(|c| c.name == o.name)));
    }
}
