//! Language registry: lookup table for language codes and text direction.
//!
//! The registry is a lazily-initialized singleton (`OnceLock`) holding an
//! ISO 639 table. It backs the [`LocaleMetadata`] service the engine uses to
//! split locale codes and classify right-to-left languages.

use super::language::Locale;
use std::sync::OnceLock;

/// Locale lookups consumed by the generation engine.
pub trait LocaleMetadata: Send + Sync {
    /// Language subtag of `locale` (`"en"` for `"en-US"`).
    fn language_code(&self, locale: &str) -> String;

    /// Region subtag of `locale`, if any.
    fn country_code(&self, locale: &str) -> Option<String>;

    /// Whether `locale` is well formed and names a known language.
    fn is_valid_locale(&self, locale: &str) -> bool;

    fn is_rtl_language(&self, language_code: &str) -> bool;
}

/// Metadata for one language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 code (ISO 639-2/3 where no two-letter code exists)
    pub code: &'static str,

    /// English name of the language
    pub name: &'static str,

    /// Written right-to-left
    pub rtl: bool,
}

pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

impl LocaleMetadata for LanguageRegistry {
    fn language_code(&self, locale: &str) -> String {
        match Locale::parse(locale) {
            Ok(parsed) => parsed.language().to_string(),
            Err(_) => locale
                .split(['-', '_'])
                .next()
                .unwrap_or_default()
                .to_lowercase(),
        }
    }

    fn country_code(&self, locale: &str) -> Option<String> {
        Locale::parse(locale)
            .ok()
            .and_then(|parsed| parsed.country().map(str::to_string))
    }

    fn is_valid_locale(&self, locale: &str) -> bool {
        Locale::parse(locale)
            .map(|parsed| self.is_known(parsed.language()))
            .unwrap_or(false)
    }

    fn is_rtl_language(&self, language_code: &str) -> bool {
        self.get_by_code(language_code)
            .map(|lang| lang.rtl)
            .unwrap_or(false)
    }
}

fn lang(code: &'static str, name: &'static str) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        rtl: false,
    }
}

fn rtl(code: &'static str, name: &'static str) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        rtl: true,
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        lang("af", "Afrikaans"),
        lang("am", "Amharic"),
        rtl("ar", "Arabic"),
        lang("az", "Azerbaijani"),
        lang("be", "Belarusian"),
        lang("bg", "Bulgarian"),
        lang("bn", "Bengali"),
        lang("bs", "Bosnian"),
        lang("ca", "Catalan"),
        rtl("ckb", "Central Kurdish"),
        lang("cs", "Czech"),
        lang("cy", "Welsh"),
        lang("da", "Danish"),
        lang("de", "German"),
        rtl("dv", "Divehi"),
        lang("el", "Greek"),
        lang("en", "English"),
        lang("eo", "Esperanto"),
        lang("es", "Spanish"),
        lang("et", "Estonian"),
        lang("eu", "Basque"),
        rtl("fa", "Persian"),
        lang("fi", "Finnish"),
        lang("fil", "Filipino"),
        lang("fr", "French"),
        lang("ga", "Irish"),
        lang("gl", "Galician"),
        lang("gu", "Gujarati"),
        lang("ha", "Hausa"),
        rtl("he", "Hebrew"),
        lang("hi", "Hindi"),
        lang("hr", "Croatian"),
        lang("hu", "Hungarian"),
        lang("hy", "Armenian"),
        lang("id", "Indonesian"),
        lang("is", "Icelandic"),
        lang("it", "Italian"),
        lang("ja", "Japanese"),
        lang("ka", "Georgian"),
        lang("kk", "Kazakh"),
        lang("km", "Khmer"),
        lang("kn", "Kannada"),
        lang("ko", "Korean"),
        rtl("ks", "Kashmiri"),
        lang("ku", "Kurdish"),
        lang("ky", "Kyrgyz"),
        lang("lo", "Lao"),
        lang("lt", "Lithuanian"),
        lang("lv", "Latvian"),
        lang("mk", "Macedonian"),
        lang("ml", "Malayalam"),
        lang("mn", "Mongolian"),
        lang("mr", "Marathi"),
        lang("ms", "Malay"),
        lang("my", "Burmese"),
        lang("nb", "Norwegian Bokmål"),
        lang("ne", "Nepali"),
        lang("nl", "Dutch"),
        lang("nn", "Norwegian Nynorsk"),
        lang("no", "Norwegian"),
        lang("pa", "Punjabi"),
        lang("pl", "Polish"),
        rtl("ps", "Pashto"),
        lang("pt", "Portuguese"),
        lang("ro", "Romanian"),
        lang("ru", "Russian"),
        rtl("sd", "Sindhi"),
        lang("si", "Sinhala"),
        lang("sk", "Slovak"),
        lang("sl", "Slovenian"),
        lang("sq", "Albanian"),
        lang("sr", "Serbian"),
        lang("sv", "Swedish"),
        lang("sw", "Swahili"),
        lang("ta", "Tamil"),
        lang("te", "Telugu"),
        lang("th", "Thai"),
        lang("tl", "Tagalog"),
        lang("tr", "Turkish"),
        rtl("ug", "Uyghur"),
        lang("uk", "Ukrainian"),
        rtl("ur", "Urdu"),
        lang("uz", "Uzbek"),
        lang("vi", "Vietnamese"),
        rtl("yi", "Yiddish"),
        lang("zh", "Chinese"),
        lang("zu", "Zulu"),
    ]
}
