//! Text direction per configured locale.

use super::registry::LocaleMetadata;
use crate::config::I18nConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Rtl,
    Ltr,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Rtl => "rtl",
            Direction::Ltr => "ltr",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rtl" => Ok(Direction::Rtl),
            "ltr" => Ok(Direction::Ltr),
            other => Err(format!("unknown text direction '{}' (expected rtl or ltr)", other)),
        }
    }
}

/// Explicit `ltr`, then explicit `rtl`, then the language table.
pub fn classify(locale: &str, config: &I18nConfig, metadata: &dyn LocaleMetadata) -> Direction {
    if config.ltr_locales().iter().any(|l| l == locale) {
        return Direction::Ltr;
    }
    if config.rtl_locales().iter().any(|l| l == locale) {
        return Direction::Rtl;
    }
    if metadata.is_rtl_language(&metadata.language_code(locale)) {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}
