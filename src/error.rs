//! Error taxonomy for the generation engine and workspace operations.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a [`Storage`](crate::storage::Storage) implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Raised when two nested paths join into the same flattened key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    #[error("flattened key '{key}' is produced by more than one entry")]
    KeyCollision { key: String },
}

/// Failures from the remote translation service.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("googleTranslateApiKey is not set.")]
    MissingApiKey,

    #[error("translation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("translation API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("translation response could not be parsed: {0}")]
    MalformedResponse(String),

    #[error("placeholders were not preserved translating '{source_text}' to '{translated}'")]
    PlaceholderMismatch {
        source_text: String,
        translated: String,
    },
}

impl TranslateError {
    /// 429, 5xx and transport failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslateError::Transport(_) => true,
            TranslateError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Top-level error surfaced to callers of the engine.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Config or default-locale resource missing/unreadable. Aborts the pass.
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A single non-default locale could not be processed.
    #[error("locale '{locale}' could not be processed: {message}")]
    LocaleProcessing { locale: String, message: String },

    #[error(transparent)]
    TranslationService(#[from] TranslateError),

    /// Invalid user input (locale codes, keys). Never reaches the pipeline.
    #[error("{0}")]
    Validation(String),
}

impl I18nError {
    pub fn configuration(message: impl Into<String>) -> Self {
        I18nError::Configuration {
            message: message.into(),
            source: None,
        }
    }

    pub fn configuration_from<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        I18nError::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        I18nError::Validation(message.into())
    }
}
