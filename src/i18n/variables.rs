//! Placeholder discovery and interpolation.
//!
//! Translation values mark interpolation points with `{name}`. Generated Dart
//! code refers to a same-named parameter with `${name}`.

use regex::{Captures, Regex};
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap())
}

/// Distinct placeholder names in order of first appearance.
///
/// Returns `None` when `text` is empty or contains no placeholder.
pub fn parse_variables(text: &str) -> Option<Vec<String>> {
    if text.is_empty() {
        return None;
    }

    let mut names: Vec<String> = Vec::new();
    for caps in placeholder_regex().captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Every placeholder occurrence, duplicates included, in text order.
pub(crate) fn placeholder_occurrences(text: &str) -> Vec<String> {
    placeholder_regex()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Rewrite `{name}` into `${name}` for each name in `variables`.
///
/// Occurrences already preceded by an unescaped `$` are left alone, so applying
/// this twice with the same list gives the same text.
pub fn replace_variables<S: AsRef<str>>(text: &str, variables: &[S]) -> String {
    variables
        .iter()
        .fold(text.to_string(), |acc, name| interpolate(&acc, name.as_ref()))
}

/// Rename placeholders in one pass using `(from, to)` pairs. Names without a
/// pair are kept.
pub(crate) fn remap_placeholders(text: &str, mapping: &[(String, String)]) -> String {
    placeholder_regex()
        .replace_all(text, |caps: &Captures| {
            match mapping.iter().find(|(from, _)| from == &caps[1]) {
                Some((_, to)) => format!("{{{}}}", to),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn interpolate(text: &str, name: &str) -> String {
    let token = format!("{{{}}}", name);
    let mut out = String::with_capacity(text.len() + 8);
    let mut rest = text;

    while let Some(idx) = rest.find(&token) {
        out.push_str(&rest[..idx]);
        if !ends_with_sigil(&out) {
            out.push('$');
        }
        out.push_str(&token);
        rest = &rest[idx + token.len()..];
    }
    out.push_str(rest);
    out
}

/// True when `text` ends with a `$` that is not itself backslash-escaped.
fn ends_with_sigil(text: &str) -> bool {
    let Some(head) = text.strip_suffix('$') else {
        return false;
    };
    let backslashes = head.chars().rev().take_while(|c| *c == '\\').count();
    backslashes % 2 == 0
}
