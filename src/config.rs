use crate::error::I18nError;
use crate::i18n::{normalize, Direction};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "i18nconfig.json";
pub const DEFAULT_LOCALE_PATH: &str = "i18n";
pub const DEFAULT_GENERATED_PATH: &str = "lib/generated";
pub const DEFAULT_TRANSLATE_API_URL: &str = "https://www.googleapis.com/language/translate/v2";

/// Workspace configuration persisted as `i18nconfig.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nConfig {
    pub default_locale: String,

    /// Configured locales. Order matters for inheritance.
    pub locales: Vec<String>,

    #[serde(default = "default_locale_path")]
    pub locale_path: String,

    #[serde(default = "default_generated_path")]
    pub generated_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtl: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ltr: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_translate_api_key: Option<String>,
}

fn default_locale_path() -> String {
    DEFAULT_LOCALE_PATH.to_string()
}

fn default_generated_path() -> String {
    DEFAULT_GENERATED_PATH.to_string()
}

impl I18nConfig {
    /// Fresh configuration with a single default locale and default paths.
    pub fn new(default_locale: &str) -> Self {
        Self {
            default_locale: default_locale.to_string(),
            locales: vec![default_locale.to_string()],
            locale_path: default_locale_path(),
            generated_path: default_generated_path(),
            rtl: None,
            ltr: None,
            google_translate_api_key: None,
        }
    }

    /// Check the invariants every loaded configuration must hold.
    pub fn validate(&self) -> Result<(), I18nError> {
        if self.default_locale.is_empty() {
            return Err(I18nError::configuration("defaultLocale is not set"));
        }
        if !self.locales.contains(&self.default_locale) {
            return Err(I18nError::configuration(format!(
                "defaultLocale '{}' is not listed in locales",
                self.default_locale
            )));
        }
        for (i, locale) in self.locales.iter().enumerate() {
            if self.locales[..i]
                .iter()
                .any(|earlier| normalize(earlier) == normalize(locale))
            {
                return Err(I18nError::configuration(format!(
                    "locale '{}' is listed more than once",
                    locale
                )));
            }
        }
        if let Some(both) = self
            .rtl_locales()
            .iter()
            .find(|l| self.ltr_locales().contains(*l))
        {
            return Err(I18nError::configuration(format!(
                "locale '{}' is configured as both rtl and ltr",
                both
            )));
        }
        Ok(())
    }

    /// Whether `locale` is configured. `en_US` and `en-US` name the same locale.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.configured_locale(locale).is_some()
    }

    /// The configured spelling of `locale`, whichever separator it was given with.
    pub fn configured_locale(&self, locale: &str) -> Option<&str> {
        let wanted = normalize(locale);
        self.locales
            .iter()
            .find(|l| normalize(l) == wanted)
            .map(String::as_str)
    }

    pub fn rtl_locales(&self) -> &[String] {
        self.rtl.as_deref().unwrap_or_default()
    }

    pub fn ltr_locales(&self) -> &[String] {
        self.ltr.as_deref().unwrap_or_default()
    }

    /// Pin `locale` to `direction`, removing it from the opposite set.
    pub fn set_direction(&mut self, locale: &str, direction: Direction) {
        self.clear_direction(locale);
        let set = match direction {
            Direction::Rtl => self.rtl.get_or_insert_with(Vec::new),
            Direction::Ltr => self.ltr.get_or_insert_with(Vec::new),
        };
        set.push(locale.to_string());
    }

    /// Drop any explicit direction for `locale`.
    pub fn clear_direction(&mut self, locale: &str) {
        for set in [&mut self.rtl, &mut self.ltr] {
            if let Some(entries) = set.as_mut() {
                entries.retain(|l| l != locale);
            }
            if set.as_ref().is_some_and(|entries| entries.is_empty()) {
                *set = None;
            }
        }
    }
}

/// Process-level settings read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Workspace root holding `i18nconfig.json`.
    pub workspace: PathBuf,

    /// Overrides `googleTranslateApiKey` from the config document.
    pub translate_api_key: Option<String>,

    pub translate_api_url: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let translate_api_url = std::env::var("GOOGLE_TRANSLATE_API_URL")
            .unwrap_or_else(|_| DEFAULT_TRANSLATE_API_URL.to_string());
        if !translate_api_url.starts_with("http://") && !translate_api_url.starts_with("https://") {
            bail!(
                "GOOGLE_TRANSLATE_API_URL must be an http(s) URL, got '{}'",
                translate_api_url
            );
        }

        Ok(Self {
            workspace: std::env::var("I18N_WORKSPACE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            translate_api_key: std::env::var("GOOGLE_TRANSLATE_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            translate_api_url,
        })
    }

    /// API key from the environment, falling back to the config document.
    pub fn api_key_for(&self, config: &I18nConfig) -> Option<String> {
        self.translate_api_key
            .clone()
            .or_else(|| config.google_translate_api_key.clone())
            .filter(|k| !k.is_empty())
    }
}
