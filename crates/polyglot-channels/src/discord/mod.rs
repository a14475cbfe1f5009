//! Discord channel.
//!
//! Uses the serenity gateway client for `MESSAGE_REACTION_ADD` events and
//! the REST client for fetching and posting messages.
//! Docs: <https://discord.com/developers/docs/topics/gateway-events>

mod events;
pub(crate) mod send;


use polyglot_core::config::DiscordConfig;
use serenity::all::{GatewayIntents, Http};
use serenity::gateway::ShardManager;
use std::sync::{Arc, OnceLock};
use tokio::sync::Mutex;

/// Discord's per-message content limit.
pub(crate) const DISCORD_MAX_LEN: usize = 2000;

/// Intents the bot subscribes with: reactions plus message content, so
/// fetched messages carry their text.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::DIRECT_MESSAGE_REACTIONS
        | GatewayIntents::MESSAGE_CONTENT
}

/// Discord channel backed by a serenity session.
pub struct DiscordChannel {
    config: DiscordConfig,
    http: Arc<Http>,
    /// Bot user ID, set once the gateway reports ready.
    self_id: Arc<OnceLock<u64>>,
    /// Handle used to close the gateway on shutdown.
    shard_manager: Mutex<Option<Arc<ShardManager>>>,
}

impl DiscordChannel {
    /// Create a new Discord channel from config.
    pub fn new(config: DiscordConfig) -> Self {
        let http = Arc::new(Http::new(&config.token));
        Self {
            config,
            http,
            self_id: Arc::new(OnceLock::new()),
            shard_manager: Mutex::new(None),
        }
    }
}

/// Parse a Discord snowflake. Zero is not a valid ID.
pub(crate) fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|id| *id != 0)
}
