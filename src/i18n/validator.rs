//! Translation quality validation.
//!
//! Machine translation must hand back the same `{name}` placeholders it was
//! given, otherwise the generated accessor would reference parameters that no
//! longer exist.

use super::variables::{parse_variables, placeholder_occurrences};

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Placeholders lost or invented by the translation
    pub errors: Vec<String>,

    /// Reordered or repeated placeholders
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PlaceholderValidator;

impl PlaceholderValidator {
    /// Compare the placeholders of `original` and `translated`.
    ///
    /// Errors: a placeholder missing from the translation, or one the
    /// translation introduced. Warnings: different order of first appearance,
    /// or a different number of occurrences of the same name.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        let orig_vars = parse_variables(original).unwrap_or_default();
        let trans_vars = parse_variables(translated).unwrap_or_default();

        let missing: Vec<_> = orig_vars.iter().filter(|v| !trans_vars.contains(*v)).collect();
        if !missing.is_empty() {
            report
                .errors
                .push(format!("Placeholders missing from translation: {:?}", missing));
        }

        let unexpected: Vec<_> = trans_vars.iter().filter(|v| !orig_vars.contains(*v)).collect();
        if !unexpected.is_empty() {
            report.errors.push(format!(
                "Translation introduced unknown placeholders: {:?}",
                unexpected
            ));
        }

        if missing.is_empty() && unexpected.is_empty() && orig_vars != trans_vars {
            report.warnings.push(format!(
                "Placeholder order changed: original has {:?}, translation has {:?}",
                orig_vars, trans_vars
            ));
        }

        let orig_count = placeholder_occurrences(original).len();
        let trans_count = placeholder_occurrences(translated).len();
        if orig_count != trans_count {
            report.warnings.push(format!(
                "Placeholder count mismatch: original has {}, translation has {}",
                orig_count, trans_count
            ));
        }

        report
    }
}
