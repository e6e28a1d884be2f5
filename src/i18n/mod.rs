//! Translation-resource-to-code generation engine.
//!
//! Turns per-locale JSON resources into a Dart `i18n.dart` exposing one
//! accessor per key, with locale subclasses and a locale registry.
//!
//! # Architecture
//!
//! - `variables`: `{name}` placeholder discovery and interpolation
//! - `flatten`: nested key trees to single-level resources
//! - `function`: canonical function table built from the default locale
//! - `diff`: per-locale overrides of the canonical table
//! - `inheritance`: which earlier locale a subclass extends
//! - `direction`: right-to-left / left-to-right classification
//! - `render` / `templates`: Dart output
//! - `resource`: config, resource and output persistence
//! - `generator`: one full generation pass
//! - `registry` / `language`: locale metadata
//! - `validator`: placeholder preservation checks for machine translation
//!
//! # Example
//!
//! ```rust,ignore
//! use flutter_i18n_gen::i18n::{generate, CodeRenderer, LanguageRegistry, ResourceStore};
//! use flutter_i18n_gen::storage::FileSystem;
//!
//! let store = ResourceStore::new(FileSystem, ".");
//! let report = generate(&store, LanguageRegistry::get(), &CodeRenderer::default())?;
//! println!("wrote {}", report.output_path.display());
//! ```

mod diff;
mod direction;
mod flatten;
mod function;
mod generator;
mod inheritance;
mod language;
mod registry;
mod render;
mod resource;
mod templates;
mod validator;
mod variables;

pub use diff::diff;
pub use direction::{classify, Direction};
pub use flatten::{flatten, join_key, Resource};
pub use function::{build, build_function, escape, FunctionDescriptor, ValueKind};
pub use generator::{
    generate, generate_document, generate_with_config, GeneratedDocument, GenerationReport,
    SkippedLocale,
};
pub use inheritance::{locale_class_name, resolve, InheritanceBase, CANONICAL_CLASS};
pub use language::{normalize, Locale};
pub use registry::{LanguageConfig, LanguageRegistry, LocaleMetadata};
pub use render::{fill, CodeRenderer, LocaleBlock, Templates};
pub use resource::{ResourceStore, OUTPUT_FILE, RESOURCE_EXTENSION};
pub use validator::{PlaceholderValidator, ValidationReport};
pub use variables::{parse_variables, replace_variables};

pub(crate) use variables::remap_placeholders;
