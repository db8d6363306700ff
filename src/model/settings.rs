use serde::{Deserialize, Serialize};

use crate::calendar::format::parse_locale;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_history_count")]
    pub history_count: usize,
}

fn default_version() -> String {
    "0.1.0".into()
}

fn default_locale() -> String {
    "fr_FR".into()
}

fn default_history_count() -> usize {
    6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            locale: default_locale(),
            history_count: default_history_count(),
        }
    }
}

impl Settings {
    /// The configured locale, validated.
    pub fn locale(&self) -> Result<chrono::Locale> {
        parse_locale(&self.locale)
    }
}
