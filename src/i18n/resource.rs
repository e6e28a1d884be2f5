//! Loading and saving the configuration document, per-locale resources and
//! the generated output.

use super::flatten::{flatten, Resource};
use crate::config::{I18nConfig, CONFIG_FILE};
use crate::error::{I18nError, StorageError};
use crate::storage::Storage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the generated artifact inside `generatedPath`.
pub const OUTPUT_FILE: &str = "i18n.dart";

/// Extension of per-locale resource files.
pub const RESOURCE_EXTENSION: &str = "json";

pub struct ResourceStore<S: Storage> {
    storage: S,
    root: PathBuf,
}

impl<S: Storage> ResourceStore<S> {
    pub fn new(storage: S, root: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn resource_dir(&self, config: &I18nConfig) -> PathBuf {
        self.root.join(&config.locale_path)
    }

    /// `<root>/<localePath>/<locale>.json`
    pub fn resource_path(&self, locale: &str, config: &I18nConfig) -> PathBuf {
        self.resource_dir(config)
            .join(format!("{}.{}", locale, RESOURCE_EXTENSION))
    }

    pub fn output_dir(&self, config: &I18nConfig) -> PathBuf {
        self.root.join(&config.generated_path)
    }

    pub fn output_path(&self, config: &I18nConfig) -> PathBuf {
        self.output_dir(config).join(OUTPUT_FILE)
    }

    pub fn config_exists(&self) -> bool {
        self.storage.exists(&self.config_path())
    }

    /// Read and validate the configuration document.
    pub fn load_config(&self) -> Result<I18nConfig, I18nError> {
        let path = self.config_path();
        let config: I18nConfig = self.storage.read_json(&path).map_err(|e| {
            I18nError::configuration_from(format!("could not read {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_config(&self, config: &I18nConfig) -> Result<(), StorageError> {
        self.storage.write_json(&self.config_path(), config)
    }

    /// A locale's resource exactly as stored (possibly nested).
    pub fn load_raw(&self, locale: &str, config: &I18nConfig) -> Result<Resource, StorageError> {
        let path = self.resource_path(locale, config);
        debug!(locale = %locale, path = %path.display(), "Reading resource");
        self.storage.read_json(&path)
    }

    /// A locale's resource flattened to leaf values.
    ///
    /// Missing, unreadable and colliding resources are reported as
    /// [`I18nError::LocaleProcessing`]; callers decide whether that is fatal.
    pub fn load_resource(&self, locale: &str, config: &I18nConfig) -> Result<Resource, I18nError> {
        let raw = self
            .load_raw(locale, config)
            .map_err(|e| I18nError::LocaleProcessing {
                locale: locale.to_string(),
                message: e.to_string(),
            })?;
        flatten(&raw).map_err(|e| I18nError::LocaleProcessing {
            locale: locale.to_string(),
            message: e.to_string(),
        })
    }

    pub fn save_resource(
        &self,
        locale: &str,
        config: &I18nConfig,
        resource: &Resource,
    ) -> Result<(), StorageError> {
        self.storage.create_dir(&self.resource_dir(config))?;
        self.storage
            .write_json(&self.resource_path(locale, config), resource)
    }

    /// Write `{}` for `locale` unless a resource already exists.
    pub fn ensure_resource(&self, locale: &str, config: &I18nConfig) -> Result<(), StorageError> {
        if self.storage.exists(&self.resource_path(locale, config)) {
            return Ok(());
        }
        self.save_resource(locale, config, &Resource::new())
    }

    /// Delete `locale`'s resource file. Returns whether a file was removed.
    pub fn delete_resource(&self, locale: &str, config: &I18nConfig) -> Result<bool, StorageError> {
        let path = self.resource_path(locale, config);
        if !self.storage.exists(&path) {
            return Ok(false);
        }
        self.storage.delete_file(&path)?;
        Ok(true)
    }

    /// Create the output directory and write the generated text.
    pub fn write_output(&self, config: &I18nConfig, text: &str) -> Result<PathBuf, StorageError> {
        self.storage.create_dir(&self.output_dir(config))?;
        let path = self.output_path(config);
        self.storage.write_text(&path, text)?;
        Ok(path)
    }
}
