//! Locale type: parsed `language[-Script][-REGION]` code.

use crate::error::I18nError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static LOCALE_REGEX: OnceLock<Regex> = OnceLock::new();

/// A syntactically valid locale code.
///
/// Accepts `-` or `_` as the subtag separator (`en-US`, `en_US`,
/// `zh-Hant-TW`, `es-419`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    script: Option<String>,
    country: Option<String>,
}

impl Locale {
    /// Parse a locale code.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is well formed
    /// * `Err(I18nError::Validation)` otherwise
    pub fn parse(code: &str) -> Result<Locale, I18nError> {
        let regex = LOCALE_REGEX.get_or_init(|| {
            Regex::new(r"^([a-z]{2,3})(?:[-_]([A-Z][a-z]{3}))?(?:[-_]([A-Z]{2}|[0-9]{3}))?$")
                .unwrap()
        });

        let caps = regex
            .captures(code)
            .ok_or_else(|| I18nError::validation(format!("Invalid locale code: '{}'", code)))?;

        Ok(Locale {
            language: caps[1].to_string(),
            script: caps.get(2).map(|m| m.as_str().to_string()),
            country: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Subtags joined with `_`, usable inside a Dart identifier.
    pub fn normalized(&self) -> String {
        normalize(&self.to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{}", script)?;
        }
        if let Some(country) = &self.country {
            write!(f, "-{}", country)?;
        }
        Ok(())
    }
}

/// Replace `-` separators with `_` (`en-US` becomes `en_US`).
pub fn normalize(locale: &str) -> String {
    locale.replace('-', "_")
}
