//! Fills the Dart templates with the canonical table, locale subclasses and
//! the locale registry.

use super::direction::Direction;
use super::function::FunctionDescriptor;
use super::inheritance::{locale_class_name, InheritanceBase};
use super::language::{normalize, Locale};
use super::templates;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

/// Separator between rendered accessors inside a class body.
const FUNCTION_SEPARATOR: &str = "\n  ";

/// The three templates the renderer fills.
#[derive(Debug, Clone)]
pub struct Templates {
    pub canonical: Cow<'static, str>,
    pub subclass: Cow<'static, str>,
    pub registry: Cow<'static, str>,
}

impl Templates {
    /// Flutter `WidgetsLocalizations` templates.
    pub fn dart() -> Self {
        Self {
            canonical: Cow::Borrowed(templates::CANONICAL),
            subclass: Cow::Borrowed(templates::SUBCLASS),
            registry: Cow::Borrowed(templates::REGISTRY),
        }
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::dart()
    }
}

/// Everything needed to render one locale's subclass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleBlock {
    pub locale: String,
    pub derived: InheritanceBase,
    pub direction: Direction,
    /// Overriding accessors; empty for the default locale.
    pub overrides: Vec<FunctionDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct CodeRenderer {
    templates: Templates,
}

impl CodeRenderer {
    pub fn new(templates: Templates) -> Self {
        Self { templates }
    }

    pub fn render_canonical(&self, table: &[FunctionDescriptor]) -> String {
        let functions = table
            .iter()
            .map(FunctionDescriptor::render)
            .collect::<Vec<_>>()
            .join(FUNCTION_SEPARATOR);

        fill(&self.templates.canonical, &[("functions", &functions)])
    }

    pub fn render_subclass(&self, block: &LocaleBlock) -> String {
        let functions = block
            .overrides
            .iter()
            .map(|f| format!("@override{}{}", FUNCTION_SEPARATOR, f.render()))
            .collect::<Vec<_>>()
            .join(FUNCTION_SEPARATOR);

        fill(
            &self.templates.subclass,
            &[
                ("functions", &functions),
                ("locale", &normalize(&block.locale)),
                ("derived", &block.derived.class_name()),
                ("textDirection", block.direction.as_str()),
            ],
        )
    }

    /// Supported locales plus the dispatch in `load`: full locale matches
    /// first, then bare language codes.
    pub fn render_registry(&self, locales: &[String]) -> String {
        let supported = locales
            .iter()
            .map(|l| locale_literal(l))
            .collect::<Vec<_>>()
            .join(",\n      ");

        let full_matches = locales.iter().map(|l| case_branch("lang", &normalize(l), l));
        let language_matches = locales
            .iter()
            .map(|l| case_branch("languageCode", &language_of(l), l));
        let cases = full_matches
            .chain(language_matches)
            .collect::<Vec<_>>()
            .join("\n    ");

        fill(
            &self.templates.registry,
            &[("locales", &supported), ("cases", &cases)],
        )
    }

    /// Canonical class, one subclass per block in order, then the registry.
    pub fn render(
        &self,
        table: &[FunctionDescriptor],
        blocks: &[LocaleBlock],
        locales: &[String],
    ) -> String {
        let mut sections = Vec::with_capacity(blocks.len() + 2);
        sections.push(self.render_canonical(table));
        sections.extend(blocks.iter().map(|b| self.render_subclass(b)));
        sections.push(self.render_registry(locales));

        let mut text = sections
            .join("\n")
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");
        text.push('\n');
        text
    }
}

/// Replace `{token}` occurrences in one pass. Inserted text is never
/// re-scanned; unknown tokens are kept as they are.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let regex = TOKEN_REGEX.get_or_init(|| Regex::new(r"\{([A-Za-z]+)\}").unwrap());

    regex
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(token, _)| *token == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Dart `Locale` constructor for a configured locale code.
fn locale_literal(locale: &str) -> String {
    match Locale::parse(locale) {
        Ok(parsed) => match parsed.script() {
            Some(script) => format!(
                "Locale.fromSubtags(languageCode: \"{}\", scriptCode: \"{}\"{})",
                parsed.language(),
                script,
                parsed
                    .country()
                    .map(|c| format!(", countryCode: \"{}\"", c))
                    .unwrap_or_default()
            ),
            None => format!(
                "Locale(\"{}\", \"{}\")",
                parsed.language(),
                parsed.country().unwrap_or_default()
            ),
        },
        Err(_) => format!("Locale(\"{}\", \"\")", language_of(locale)),
    }
}

fn language_of(locale: &str) -> String {
    match Locale::parse(locale) {
        Ok(parsed) => parsed.language().to_string(),
        Err(_) => normalize(locale)
            .split('_')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

fn case_branch(variable: &str, value: &str, locale: &str) -> String {
    format!(
        "if (\"{}\" == {}) {{\n      return SynchronousFuture<WidgetsLocalizations>(const {}());\n    }}",
        value,
        variable,
        locale_class_name(locale)
    )
}
