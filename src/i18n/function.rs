//! Canonical function table: one Dart accessor per translation key.

use super::flatten::Resource;
use super::variables::{parse_variables, replace_variables};
use serde_json::Value;

/// Shape of the accessor's return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    List,
}

/// A generated accessor for one translation key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub name: String,
    /// Dart declaration, e.g. `String get title` or `String greet(String name)`.
    pub signature: String,
    /// Dart expression returned by the accessor.
    pub body: String,
    /// Placeholder names, in parameter order. Empty for zero-argument getters.
    pub variables: Vec<String>,
    pub kind: ValueKind,
}

impl FunctionDescriptor {
    pub fn is_parameterized(&self) -> bool {
        !self.variables.is_empty()
    }

    /// `signature => body;`
    pub fn render(&self) -> String {
        format!("{} => {};", self.signature, self.body)
    }

    /// Same accessor with a different body, used for locale overrides.
    pub fn with_body(&self, body: String) -> Self {
        Self {
            body,
            ..self.clone()
        }
    }
}

/// Build the ordered function table for a flattened resource.
///
/// Order follows the resource's iteration order and every key yields exactly
/// one descriptor.
pub fn build(resource: &Resource) -> Vec<FunctionDescriptor> {
    resource
        .iter()
        .map(|(name, value)| build_function(name, value))
        .collect()
}

/// Build a single descriptor for `name` with `value`.
pub fn build_function(name: &str, value: &Value) -> FunctionDescriptor {
    match value {
        Value::Array(items) => FunctionDescriptor {
            name: name.to_string(),
            signature: format!("List<String> get {}", name),
            body: list_literal(items),
            variables: Vec::new(),
            kind: ValueKind::List,
        },
        other => {
            let text = leaf_text(other);
            match parse_variables(&text) {
                Some(variables) => {
                    let params = variables
                        .iter()
                        .map(|v| format!("String {}", v))
                        .collect::<Vec<_>>()
                        .join(", ");
                    FunctionDescriptor {
                        name: name.to_string(),
                        signature: format!("String {}({})", name, params),
                        body: interpolated_literal(&text, &variables),
                        variables,
                        kind: ValueKind::Text,
                    }
                }
                None => FunctionDescriptor {
                    name: name.to_string(),
                    signature: format!("String get {}", name),
                    body: string_literal(&text),
                    variables: Vec::new(),
                    kind: ValueKind::Text,
                },
            }
        }
    }
}

/// Text of a non-array leaf. Strings are taken verbatim, null is empty and
/// other scalars use their JSON spelling.
pub fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Escape text for embedding in a double-quoted Dart string.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out
}

pub fn string_literal(text: &str) -> String {
    format!("\"{}\"", escape(text))
}

/// Escaped literal with `variables` rewritten to Dart interpolation.
pub fn interpolated_literal<S: AsRef<str>>(text: &str, variables: &[S]) -> String {
    format!("\"{}\"", replace_variables(&escape(text), variables))
}

pub fn list_literal(items: &[Value]) -> String {
    let elements = items
        .iter()
        .map(|item| string_literal(&leaf_text(item)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", elements)
}
