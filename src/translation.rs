use crate::error::TranslateError;
use crate::i18n::{parse_variables, remap_placeholders, PlaceholderValidator};
use crate::retry::{with_retry_if, RetryConfig};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Remote machine translation.
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translate `text` into `target_language` (ISO 639 language code).
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError>;
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Google Cloud Translation (v2) client.
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    source_language: String,
    retry: RetryConfig,
}

impl GoogleTranslator {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        source_language: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            source_language: source_language.into(),
            retry: RetryConfig::translate_api(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn request(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .post(&self.api_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", text),
                ("source", self.source_language.as_str()),
                ("target", target_language),
                ("format", "text"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(payload) => payload.error.message,
                Err(_) => format!("unparsable error payload: {}", body),
            };
            return Err(TranslateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: TranslateResponse = serde_json::from_str(&body)
            .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                TranslateError::MalformedResponse("response contained no translations".to_string())
            })
    }
}

#[async_trait]
impl TranslationService for GoogleTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        with_retry_if(
            &self.retry,
            &format!("Translation to {}", target_language),
            || self.request(text, target_language),
            TranslateError::is_retryable,
        )
        .await
    }
}

/// Translate `text`, then restore the source placeholder names.
///
/// Translators sometimes translate placeholder names (`{name}` to `{nombre}`).
/// When the translated text has as many distinct placeholders as the source,
/// they are renamed positionally; a translation that keeps every source name
/// is left as is even if it reordered them. Any other outcome is a
/// [`TranslateError::PlaceholderMismatch`].
pub async fn translate_preserving_placeholders(
    service: &dyn TranslationService,
    text: &str,
    target_language: &str,
) -> Result<String, TranslateError> {
    let translated = service.translate(text, target_language).await?;

    let source_vars = parse_variables(text).unwrap_or_default();
    let translated_vars = parse_variables(&translated).unwrap_or_default();

    let restored = if same_names(&source_vars, &translated_vars) {
        translated
    } else if source_vars.len() == translated_vars.len() {
        debug!(
            source = ?source_vars,
            translated = ?translated_vars,
            "Restoring translated placeholder names"
        );
        let mapping: Vec<(String, String)> = translated_vars.into_iter().zip(source_vars).collect();
        remap_placeholders(&translated, &mapping)
    } else {
        return Err(TranslateError::PlaceholderMismatch {
            source_text: text.to_string(),
            translated,
        });
    };

    let report = PlaceholderValidator::validate(text, &restored);
    if report.has_errors() {
        return Err(TranslateError::PlaceholderMismatch {
            source_text: text.to_string(),
            translated: restored,
        });
    }
    if report.has_warnings() {
        warn!(
            language = %target_language,
            warnings = ?report.warnings,
            "Translation placeholder warnings"
        );
    }

    Ok(restored)
}

/// Translate a resource leaf. Strings are translated, arrays element-wise,
/// anything else is copied unchanged.
pub async fn translate_value(
    service: &dyn TranslationService,
    value: &Value,
    target_language: &str,
) -> Result<Value, TranslateError> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Ok(Value::String(
            translate_preserving_placeholders(service, text, target_language).await?,
        )),
        Value::Array(items) => {
            let mut translated = Vec::with_capacity(items.len());
            for item in items {
                translated.push(match item {
                    Value::String(text) if !text.trim().is_empty() => Value::String(
                        translate_preserving_placeholders(service, text, target_language).await?,
                    ),
                    other => other.clone(),
                });
            }
            Ok(Value::Array(translated))
        }
        other => Ok(other.clone()),
    }
}

fn same_names(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().all(|name| b.contains(name))
}
