//! User-level operations on a localization workspace.
//!
//! Each mutating operation persists its change and then runs a generation pass
//! so `i18n.dart` always reflects the resources on disk.

use crate::config::I18nConfig;
use crate::error::{I18nError, StorageError};
use crate::i18n::{
    build_function, flatten, generate_with_config, CodeRenderer, Direction, GenerationReport,
    LanguageRegistry, Locale, LocaleMetadata, Resource, ResourceStore,
};
use crate::storage::Storage;
use crate::translation::{translate_value, TranslationService};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, info};

static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Dart reserved words that cannot name an accessor.
const RESERVED_WORDS: &[&str] = &[
    "assert", "break", "case", "catch", "class", "const", "continue", "default", "do", "else",
    "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void",
    "while", "with",
];

/// Whether `key` can be used verbatim as a Dart accessor name.
pub fn is_dart_identifier(key: &str) -> bool {
    let re = IDENTIFIER_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
    re.is_match(key) && !RESERVED_WORDS.contains(&key)
}

/// Result of [`Workspace::insert_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The default resource already defines the key; nothing was written.
    AlreadyExists,
    /// The key was added. `call_suffix` is the argument list (`"(a, b)"`) a
    /// call site needs when the value has placeholders.
    Inserted { call_suffix: Option<String> },
}

/// Keys added to one locale by [`Workspace::auto_translate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTranslation {
    pub locale: String,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TranslationReport {
    pub translated: Vec<LocaleTranslation>,
    /// Locales sharing the default locale's language.
    pub same_language: Vec<String>,
    pub generation: GenerationReport,
}

impl TranslationReport {
    pub fn key_count(&self) -> usize {
        self.translated.iter().map(|t| t.keys.len()).sum()
    }
}

pub struct Workspace<S: Storage> {
    store: ResourceStore<S>,
    metadata: &'static dyn LocaleMetadata,
    renderer: CodeRenderer,
}

impl<S: Storage> Workspace<S> {
    pub fn new(store: ResourceStore<S>) -> Self {
        Self {
            store,
            metadata: LanguageRegistry::get(),
            renderer: CodeRenderer::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: &'static dyn LocaleMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_renderer(mut self, renderer: CodeRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn metadata(&self) -> &dyn LocaleMetadata {
        self.metadata
    }

    pub fn load_config(&self) -> Result<I18nConfig, I18nError> {
        self.store.load_config()
    }

    /// Create the configuration, the default resource and the output.
    pub fn init(&self, default_locale: &str) -> Result<GenerationReport, I18nError> {
        if self.store.config_exists() {
            return Err(I18nError::validation(format!(
                "{} already exists",
                self.store.config_path().display()
            )));
        }
        self.validate_locale(default_locale)?;

        let config = I18nConfig::new(default_locale);
        self.store
            .save_config(&config)
            .map_err(|e| I18nError::configuration_from("could not write configuration", e))?;
        self.store
            .ensure_resource(default_locale, &config)
            .map_err(|e| I18nError::configuration_from("could not create default resource", e))?;

        info!(
            locale = %default_locale,
            root = %self.store.root().display(),
            "Initialized workspace"
        );
        self.regenerate(&config)
    }

    /// Register `locale`, optionally pinning its text direction.
    pub fn add_locale(
        &self,
        locale: &str,
        direction: Option<Direction>,
    ) -> Result<GenerationReport, I18nError> {
        let mut config = self.store.load_config()?;
        self.validate_locale(locale)?;
        if config.has_locale(locale) {
            return Err(I18nError::validation(format!(
                "locale '{}' is already configured",
                locale
            )));
        }

        config.locales.push(locale.to_string());
        if let Some(direction) = direction {
            config.set_direction(locale, direction);
        }

        self.store
            .ensure_resource(locale, &config)
            .map_err(|e| locale_error(locale, e))?;
        self.save_config(&config)?;

        info!(locale = %locale, direction = ?direction, "Added locale");
        self.regenerate(&config)
    }

    /// Unregister `locale` and delete its resource file.
    pub fn remove_locale(&self, locale: &str) -> Result<GenerationReport, I18nError> {
        let mut config = self.store.load_config()?;
        let Some(locale) = config.configured_locale(locale).map(str::to_string) else {
            return Err(I18nError::validation(format!(
                "locale '{}' is not configured",
                locale
            )));
        };
        let locale = locale.as_str();
        if locale == config.default_locale {
            return Err(I18nError::validation(format!(
                "'{}' is the default locale and cannot be removed",
                locale
            )));
        }

        config.locales.retain(|l| l != locale);
        config.clear_direction(locale);
        self.save_config(&config)?;

        let deleted = self
            .store
            .delete_resource(locale, &config)
            .map_err(|e| locale_error(locale, e))?;

        info!(locale = %locale, deleted_resource = deleted, "Removed locale");
        self.regenerate(&config)
    }

    /// Regenerate `i18n.dart` from the current resources.
    pub fn update(&self) -> Result<GenerationReport, I18nError> {
        let config = self.store.load_config()?;
        self.regenerate(&config)
    }

    /// Add `key` with `value` to the default locale's resource.
    pub fn insert_key(&self, key: &str, value: &str) -> Result<InsertOutcome, I18nError> {
        if !is_dart_identifier(key) {
            return Err(I18nError::validation(format!(
                "'{}' is not a valid Dart identifier",
                key
            )));
        }

        let config = self.store.load_config()?;
        let default_locale = config.default_locale.as_str();
        let mut raw = self
            .store
            .load_raw(default_locale, &config)
            .map_err(|e| I18nError::configuration_from("could not read default resource", e))?;

        let existing = flatten(&raw).map_err(|e| {
            I18nError::configuration_from("default locale resource cannot be used", e)
        })?;
        if raw.contains_key(key) || existing.contains_key(key) {
            info!(key = %key, "Key already exists");
            return Ok(InsertOutcome::AlreadyExists);
        }

        let value = Value::String(value.to_string());
        raw.insert(key.to_string(), value.clone());
        self.store
            .save_resource(default_locale, &config, &raw)
            .map_err(|e| I18nError::configuration_from("could not write default resource", e))?;

        self.regenerate(&config)?;

        let descriptor = build_function(key, &value);
        let call_suffix = descriptor
            .is_parameterized()
            .then(|| format!("({})", descriptor.variables.join(", ")));

        info!(key = %key, "Inserted key");
        Ok(InsertOutcome::Inserted { call_suffix })
    }

    /// Machine-translate keys missing from non-default locales.
    ///
    /// Each locale's resource is written as soon as its keys are translated.
    /// A service failure stops the run; locales already written keep their
    /// new keys.
    pub async fn auto_translate(
        &self,
        service: &dyn TranslationService,
    ) -> Result<TranslationReport, I18nError> {
        let config = self.store.load_config()?;
        let default_resource = self
            .store
            .load_resource(&config.default_locale, &config)
            .map_err(|e| {
                I18nError::configuration(format!("default locale resource cannot be used: {}", e))
            })?;
        let default_language = self.metadata.language_code(&config.default_locale);

        let mut translated = Vec::new();
        let mut same_language = Vec::new();

        for locale in config.locales.iter().filter(|l| **l != config.default_locale) {
            let language = self.metadata.language_code(locale);
            if language == default_language {
                debug!(locale = %locale, "Same language as default, not translating");
                same_language.push(locale.clone());
                continue;
            }

            let mut raw = match self.store.load_raw(locale, &config) {
                Ok(raw) => raw,
                Err(StorageError::NotFound(_)) => Resource::new(),
                Err(e) => return Err(locale_error(locale, e)),
            };
            let existing = flatten(&raw).map_err(|e| locale_error(locale, e))?;

            let mut keys = Vec::new();
            for (key, value) in default_resource.iter() {
                if existing.contains_key(key) {
                    continue;
                }
                let value = translate_value(service, value, &language).await?;
                raw.insert(key.clone(), value);
                keys.push(key.clone());
            }

            if keys.is_empty() {
                debug!(locale = %locale, "Nothing to translate");
                continue;
            }

            self.store
                .save_resource(locale, &config, &raw)
                .map_err(|e| locale_error(locale, e))?;
            info!(locale = %locale, keys = keys.len(), "Wrote machine translations");

            translated.push(LocaleTranslation {
                locale: locale.clone(),
                keys,
            });
        }

        let generation = self.regenerate(&config)?;
        Ok(TranslationReport {
            translated,
            same_language,
            generation,
        })
    }

    /// Well-formed and naming a known language.
    pub fn validate_locale(&self, locale: &str) -> Result<Locale, I18nError> {
        let parsed = Locale::parse(locale)?;
        if !self.metadata.is_valid_locale(locale) {
            return Err(I18nError::validation(format!(
                "'{}' is not a known language",
                parsed.language()
            )));
        }
        Ok(parsed)
    }

    fn save_config(&self, config: &I18nConfig) -> Result<(), I18nError> {
        self.store
            .save_config(config)
            .map_err(|e| I18nError::configuration_from("could not write configuration", e))
    }

    fn regenerate(&self, config: &I18nConfig) -> Result<GenerationReport, I18nError> {
        generate_with_config(&self.store, config, self.metadata, &self.renderer)
    }
}

fn locale_error(locale: &str, error: impl std::fmt::Display) -> I18nError {
    I18nError::LocaleProcessing {
        locale: locale.to_string(),
        message: error.to_string(),
    }
}
