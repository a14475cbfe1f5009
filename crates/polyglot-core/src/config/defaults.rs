//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "Polyglot".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_translator_base_url() -> String {
    "https://libretranslate.com".to_string()
}
