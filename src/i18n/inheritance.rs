//! Which generated class a locale's subclass extends.

use super::language::normalize;

/// Name of the canonical generated class.
pub const CANONICAL_CLASS: &str = "I18n";

/// Base a locale's generated class derives from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InheritanceBase {
    Canonical,
    Locale(String),
}

impl InheritanceBase {
    /// Generated Dart class name of the base.
    pub fn class_name(&self) -> String {
        match self {
            InheritanceBase::Canonical => CANONICAL_CLASS.to_string(),
            InheritanceBase::Locale(locale) => locale_class_name(locale),
        }
    }
}

/// `_I18n_<normalized locale>`
pub fn locale_class_name(locale: &str) -> String {
    format!("_{}_{}", CANONICAL_CLASS, normalize(locale))
}

/// Nearest preceding configured locale sharing `locale`'s language code.
///
/// Only locales strictly before `locale` are considered, scanning backwards.
/// A locale that is not configured, or has no same-language predecessor,
/// derives from the canonical class. The result depends only on configured
/// order and `language_code` equality.
pub fn resolve<F>(locale: &str, configured: &[String], language_code: F) -> InheritanceBase
where
    F: Fn(&str) -> String,
{
    let Some(position) = configured.iter().position(|l| l == locale) else {
        return InheritanceBase::Canonical;
    };

    let language = language_code(locale);
    configured[..position]
        .iter()
        .rev()
        .find(|candidate| language_code(candidate.as_str()) == language)
        .map(|candidate| InheritanceBase::Locale(candidate.clone()))
        .unwrap_or(InheritanceBase::Canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{LanguageRegistry, LocaleMetadata};

    fn locales(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn lang(locale: &str) -> String {
        LanguageRegistry::get().language_code(locale)
    }

    #[test]
    fn test_region_variant_derives_from_earlier_same_language() {
        let configured = locales(&["en-US", "en-GB", "fr-FR"]);

        assert_eq!(resolve("en-US", &configured, lang), InheritanceBase::Canonical);
        assert_eq!(
            resolve("en-GB", &configured, lang),
            InheritanceBase::Locale("en-US".to_string())
        );
        assert_eq!(resolve("fr-FR", &configured, lang), InheritanceBase::Canonical);
    }

    #[test]
    fn test_nearest_preceding_match_wins() {
        let configured = locales(&["en-US", "fr-FR", "en-GB", "de-DE", "en-AU"]);

        assert_eq!(
            resolve("en-AU", &configured, lang),
            InheritanceBase::Locale("en-GB".to_string())
        );
    }

    #[test]
    fn test_later_locales_are_never_bases() {
        let configured = locales(&["pt-BR", "pt-PT"]);
        assert_eq!(resolve("pt-BR", &configured, lang), InheritanceBase::Canonical);
    }

    #[test]
    fn test_unconfigured_locale_is_canonical() {
        let configured = locales(&["en-US"]);
        assert_eq!(resolve("en-GB", &configured, lang), InheritanceBase::Canonical);
    }

    #[test]
    fn test_class_names() {
        assert_eq!(InheritanceBase::Canonical.class_name(), "I18n");
        assert_eq!(
            InheritanceBase::Locale("en-US".to_string()).class_name(),
            "_I18n_en_US"
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let configured = locales(&["es-ES", "es-MX", "es-AR"]);
        let first = resolve("es-AR", &configured, lang);
        let second = resolve("es-AR", &configured, lang);
        assert_eq!(first, second);
        assert_eq!(first, InheritanceBase::Locale("es-MX".to_string()));
    }
}
