mod channels;
mod defaults;
mod translator;


pub use channels::*;
pub use translator::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::error::PolyglotError;
use crate::languages::LanguageMap;
use defaults::*;

/// Top-level Polyglot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub polyglot: PolyglotConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
    /// Flag → code overrides. Empty = built-in table.
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolyglotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log to this file instead of stderr. Empty = stderr.
    #[serde(default)]
    pub log_file: String,
}

impl Default for PolyglotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            log_file: String::new(),
        }
    }
}

impl Config {
    /// The flag table the pipeline should use.
    pub fn language_map(&self) -> LanguageMap {
        if self.languages.is_empty() {
            LanguageMap::default()
        } else {
            LanguageMap::from_pairs(self.languages.clone())
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_token_override(std::env::var(DISCORD_TOKEN_ENV).ok());
    }

    /// Replace the Discord token with `token` when it is non-empty.
    ///
    /// Creates an enabled Discord section if the file had none.
    pub fn apply_token_override(&mut self, token: Option<String>) {
        let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
            return;
        };
        let discord = self
            .channel
            .discord
            .get_or_insert_with(DiscordConfig::default);
        discord.token = token.trim().to_string();
    }

    /// Reject configurations the bot cannot start with.
    pub fn validate(&self) -> Result<(), PolyglotError> {
        if let Some(ref dc) = self.channel.discord {
            if dc.enabled && dc.token.trim().is_empty() {
                return Err(PolyglotError::Config(format!(
                    "Discord is enabled but token is empty. \
                     Set it in config.toml or the {DISCORD_TOKEN_ENV} env var."
                )));
            }
        }

        if let Some((emoji, _)) = self.languages.iter().find(|(_, c)| c.trim().is_empty()) {
            return Err(PolyglotError::Config(format!(
                "language code for {emoji} is empty"
            )));
        }

        if self.translator.base_url.trim().is_empty() {
            return Err(PolyglotError::Config(
                "translator.base_url must not be empty".into(),
            ));
        }

        Ok(())
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. Environment
/// overrides are applied either way.
pub fn load(path: &str) -> Result<Config, PolyglotError> {
    let mut config = parse_file(path)?;
    config.apply_env_overrides();
    Ok(config)
}

fn parse_file(path: &str) -> Result<Config, PolyglotError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config {
            channel: ChannelConfig {
                discord: Some(DiscordConfig::default()),
            },
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        PolyglotError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    parse_str(&content)
}

/// Parse configuration from TOML text.
pub fn parse_str(content: &str) -> Result<Config, PolyglotError> {
    toml::from_str(content)
        .map_err(|e| PolyglotError::Config(format!("failed to parse config: {}", e)))
}
