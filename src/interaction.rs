//! Prompting the user for missing command input.

use crate::i18n::{Locale, LocaleMetadata};
use crate::workspace::is_dart_identifier;
use std::io::{self, BufRead, Write};

/// Returns an error message for invalid input, `None` when it is acceptable.
pub type InputValidator<'a> = &'a dyn Fn(&str) -> Option<String>;

pub trait UserInteraction {
    /// Ask for a line of text. `None` means the user cancelled.
    fn prompt(
        &mut self,
        text: &str,
        placeholder: &str,
        validator: InputValidator<'_>,
    ) -> Option<String>;

    /// Let the user pick one of `options`.
    fn pick_one(&mut self, title: &str, options: &[String]) -> Option<String>;

    fn show_info(&mut self, message: &str);

    fn show_error(&mut self, message: &str);
}

/// Line-oriented terminal interaction.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next trimmed line, or `None` on end of input or an empty line.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let line = line.trim();
                (!line.is_empty()).then(|| line.to_string())
            }
        }
    }

    fn print(&mut self, text: &str) {
        // A closed terminal has nowhere to report to.
        let _ = write!(self.output, "{}", text);
        let _ = self.output.flush();
    }
}

impl<R: BufRead, W: Write> UserInteraction for Console<R, W> {
    fn prompt(
        &mut self,
        text: &str,
        placeholder: &str,
        validator: InputValidator<'_>,
    ) -> Option<String> {
        loop {
            self.print(&format!("{} ({}): ", text, placeholder));
            let answer = self.read_line()?;
            match validator(&answer) {
                None => return Some(answer),
                Some(problem) => self.print(&format!("{}\n", problem)),
            }
        }
    }

    fn pick_one(&mut self, title: &str, options: &[String]) -> Option<String> {
        if options.is_empty() {
            return None;
        }

        let mut menu = format!("{}\n", title);
        for (i, option) in options.iter().enumerate() {
            menu.push_str(&format!("  {}) {}\n", i + 1, option));
        }
        self.print(&menu);

        loop {
            self.print(&format!("Choose 1-{}: ", options.len()));
            let answer = self.read_line()?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Some(options[n - 1].clone()),
                _ => {
                    if let Some(option) = options.iter().find(|o| **o == answer) {
                        return Some(option.clone());
                    }
                    self.print("Not one of the listed options.\n");
                }
            }
        }
    }

    fn show_info(&mut self, message: &str) {
        self.print(&format!("{}\n", message));
    }

    fn show_error(&mut self, message: &str) {
        self.print(&format!("error: {}\n", message));
    }
}

/// Accepts well-formed locales naming a known language.
pub fn locale_validator(metadata: &dyn LocaleMetadata) -> impl Fn(&str) -> Option<String> + '_ {
    move |input| match Locale::parse(input) {
        Err(e) => Some(e.to_string()),
        Ok(_) if !metadata.is_valid_locale(input) => {
            Some(format!("'{}' is not a known language", input))
        }
        Ok(_) => None,
    }
}

/// Accepts keys usable as Dart accessor names.
pub fn key_validator(input: &str) -> Option<String> {
    if is_dart_identifier(input) {
        None
    } else {
        Some(format!("'{}' is not a valid Dart identifier", input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LanguageRegistry;
    use std::io::Cursor;

    fn scripted(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.output.clone()).unwrap()
    }

    #[test]
    fn test_prompt_retries_until_valid() {
        let mut console = scripted("bad key\ntitle\n");
        let answer = console.prompt("Key", "title", &key_validator);

        assert_eq!(answer.as_deref(), Some("title"));
        assert!(printed(&console).contains("'bad key' is not a valid Dart identifier"));
    }

    #[test]
    fn test_prompt_empty_line_cancels() {
        let mut console = scripted("\n");
        assert_eq!(console.prompt("Key", "title", &key_validator), None);

        let mut console = scripted("");
        assert_eq!(console.prompt("Key", "title", &key_validator), None);
    }

    #[test]
    fn test_pick_one_by_number_or_name() {
        let options = vec!["rtl".to_string(), "ltr".to_string()];

        let mut console = scripted("2\n");
        assert_eq!(console.pick_one("Direction", &options).as_deref(), Some("ltr"));

        let mut console = scripted("9\nrtl\n");
        assert_eq!(console.pick_one("Direction", &options).as_deref(), Some("rtl"));
        assert!(printed(&console).contains("Not one of the listed options."));
    }

    #[test]
    fn test_locale_validator() {
        let validate = locale_validator(LanguageRegistry::get());

        assert_eq!(validate("fr-FR"), None);
        assert_eq!(validate("zh-Hant-TW"), None);
        assert!(validate("french").is_some());
        assert!(validate("zz-ZZ").unwrap().contains("not a known language"));
    }
}
