//! One generation pass: config and resources in, `i18n.dart` out.

use super::diff::diff;
use super::direction::classify;
use super::flatten::Resource;
use super::function::{build, FunctionDescriptor};
use super::inheritance::{resolve, InheritanceBase};
use super::registry::LocaleMetadata;
use super::render::{CodeRenderer, LocaleBlock};
use super::resource::ResourceStore;
use crate::config::I18nConfig;
use crate::error::I18nError;
use crate::storage::Storage;
use std::path::PathBuf;
use tracing::{info, warn};

/// A locale whose overrides were left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLocale {
    pub locale: String,
    pub reason: String,
}

/// Rendered text plus what had to be skipped on the way.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub text: String,
    pub accessor_count: usize,
    pub skipped: Vec<SkippedLocale>,
}

/// Outcome of a persisted generation pass.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub accessor_count: usize,
    pub locale_count: usize,
    pub skipped: Vec<SkippedLocale>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Build the document from an already loaded default resource.
///
/// `load_locale` supplies the flattened resource of each non-default locale.
/// A failing locale keeps an empty subclass (so later locales can still
/// derive from it) and is listed in [`GeneratedDocument::skipped`].
pub fn generate_document<F>(
    config: &I18nConfig,
    default_resource: &Resource,
    mut load_locale: F,
    metadata: &dyn LocaleMetadata,
    renderer: &CodeRenderer,
) -> GeneratedDocument
where
    F: FnMut(&str) -> Result<Resource, I18nError>,
{
    // The canonical table is complete before any locale is looked at.
    let canonical: Vec<FunctionDescriptor> = build(default_resource);
    let language_code = |locale: &str| metadata.language_code(locale);

    let mut skipped = Vec::new();
    let blocks: Vec<LocaleBlock> = config
        .locales
        .iter()
        .map(|locale| {
            let is_default = *locale == config.default_locale;
            let overrides = if is_default {
                Vec::new()
            } else {
                match load_locale(locale.as_str()) {
                    Ok(resource) => diff(&canonical, &resource),
                    Err(e) => {
                        warn!(locale = %locale, error = %e, "Skipping locale overrides");
                        skipped.push(SkippedLocale {
                            locale: locale.clone(),
                            reason: e.to_string(),
                        });
                        Vec::new()
                    }
                }
            };

            // The default locale's strings are the canonical class itself.
            let derived = if is_default {
                InheritanceBase::Canonical
            } else {
                resolve(locale, &config.locales, language_code)
            };

            LocaleBlock {
                locale: locale.clone(),
                derived,
                direction: classify(locale, config, metadata),
                overrides,
            }
        })
        .collect();

    GeneratedDocument {
        text: renderer.render(&canonical, &blocks, &config.locales),
        accessor_count: canonical.len(),
        skipped,
    }
}

/// Load everything from `store`, render and write the output artifact.
///
/// A missing or unreadable config or default resource aborts the pass before
/// anything is written.
pub fn generate<S: Storage>(
    store: &ResourceStore<S>,
    metadata: &dyn LocaleMetadata,
    renderer: &CodeRenderer,
) -> Result<GenerationReport, I18nError> {
    let config = store.load_config()?;
    generate_with_config(store, &config, metadata, renderer)
}

pub fn generate_with_config<S: Storage>(
    store: &ResourceStore<S>,
    config: &I18nConfig,
    metadata: &dyn LocaleMetadata,
    renderer: &CodeRenderer,
) -> Result<GenerationReport, I18nError> {
    let default_resource = store
        .load_resource(&config.default_locale, config)
        .map_err(|e| {
            I18nError::configuration(format!(
                "default locale resource cannot be used: {}",
                e
            ))
        })?;

    let document = generate_document(
        config,
        &default_resource,
        |locale| store.load_resource(locale, config),
        metadata,
        renderer,
    );

    let output_path = store.write_output(config, &document.text).map_err(|e| {
        I18nError::configuration_from("could not write generated output", e)
    })?;

    info!(
        path = %output_path.display(),
        accessors = document.accessor_count,
        locales = config.locales.len(),
        skipped = document.skipped.len(),
        "Generated localization code"
    );

    Ok(GenerationReport {
        output_path,
        accessor_count: document.accessor_count,
        locale_count: config.locales.len(),
        skipped: document.skipped,
    })
}
