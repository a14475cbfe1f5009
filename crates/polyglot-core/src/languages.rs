//! Flag emoji → language code table.

use std::collections::BTreeMap;

/// Built-in flags and the LibreTranslate codes they select.
pub const DEFAULT_FLAGS: &[(&str, &str)] = &[
    ("🇬🇧", "en"),
    ("🇪🇸", "es"),
    ("🇫🇷", "fr"),
    ("🇩🇪", "de"),
    ("🇫🇮", "fi"),
    ("🇳🇴", "no"),
    ("🇸🇪", "sv"),
];

/// Read-only mapping from reaction glyph to target language code.
///
/// Built once at startup and shared behind an `Arc`; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMap {
    flags: BTreeMap<String, String>,
}

impl Default for LanguageMap {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_FLAGS.iter().copied())
    }
}

impl LanguageMap {
    /// Build a map from `(emoji, code)` pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            flags: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Language code for a reaction glyph, if it is a known flag.
    pub fn code_for(&self, emoji: &str) -> Option<&str> {
        self.flags.get(emoji).map(String::as_str)
    }

    /// Resolve a user-supplied target: either a known flag or a code
    /// already present in the table.
    pub fn resolve_target(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        self.code_for(input).or_else(|| {
            self.flags
                .values()
                .find(|code| code.eq_ignore_ascii_case(input))
                .map(String::as_str)
        })
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterate `(emoji, code)` pairs in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
