use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Environment variable that overrides `channel.discord.token`.
pub const DISCORD_TOKEN_ENV: &str = "DISCORD_TOKEN";

/// Channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelConfig {
    pub discord: Option<DiscordConfig>,
}

/// Discord bot config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub token: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            token: String::new(),
        }
    }
}
