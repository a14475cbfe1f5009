use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Translation endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Base URL of a LibreTranslate-compatible server; `/translate` is appended.
    #[serde(default = "default_translator_base_url")]
    pub base_url: String,
    /// Optional LibreTranslate API key. Empty = unauthenticated.
    #[serde(default)]
    pub api_key: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_translator_base_url(),
            api_key: String::new(),
        }
    }
}

impl TranslatorConfig {
    /// The API key, or `None` when unset.
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }
}
