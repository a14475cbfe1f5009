//! Gateway event forwarding and Channel trait implementation.

use super::send::source_from_message;
use super::{intents, parse_id, DiscordChannel};
use async_trait::async_trait;
use polyglot_core::{
    error::PolyglotError,
    message::{OutgoingMessage, ReactionEvent, SourceMessage},
    traits::Channel,
};
use serenity::all::{ChannelId, Client, Context, EventHandler, MessageId, Reaction, Ready};
use std::sync::{Arc, OnceLock};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Forwards reaction-added events from the serenity session into the gateway.
struct ReactionForwarder {
    tx: mpsc::Sender<ReactionEvent>,
    self_id: Arc<OnceLock<u64>>,
}

/// Build the platform-neutral event for a reaction.
pub(crate) fn reaction_event(
    user_id: u64,
    emoji: String,
    channel_id: u64,
    message_id: u64,
) -> ReactionEvent {
    ReactionEvent::new(
        "discord",
        user_id.to_string(),
        emoji,
        channel_id.to_string(),
        message_id.to_string(),
    )
}

#[async_trait]
impl EventHandler for ReactionForwarder {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        let _ = self.self_id.set(ready.user.id.get());
        info!("Logged in as {} ({})", ready.user.name, ready.user.id);
    }

    async fn reaction_add(&self, _ctx: Context, reaction: Reaction) {
        let Some(user_id) = reaction.user_id else {
            debug!("discord: reaction without user_id, skipping");
            return;
        };

        let event = reaction_event(
            user_id.get(),
            reaction.emoji.to_string(),
            reaction.channel_id.get(),
            reaction.message_id.get(),
        );

        if self.tx.send(event).await.is_err() {
            info!("discord channel receiver dropped, ignoring reaction");
        }
    }
}

/// Missing Access (403) or Unknown Channel/Message (404).
fn is_inaccessible(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(http_err) => matches!(
            http_err.status_code().map(|s| s.as_u16()),
            Some(403 | 404)
        ),
        _ => false,
    }
}

#[async_trait]
impl Channel for DiscordChannel {
    fn name(&self) -> &str {
        "discord"
    }

    async fn start(&self) -> Result<mpsc::Receiver<ReactionEvent>, PolyglotError> {
        let (tx, rx) = mpsc::channel(64);
        let handler = ReactionForwarder {
            tx,
            self_id: self.self_id.clone(),
        };

        let mut client = Client::builder(&self.config.token, intents())
            .event_handler(handler)
            .await
            .map_err(|e| PolyglotError::Channel(format!("discord client setup failed: {e}")))?;

        *self.shard_manager.lock().await = Some(client.shard_manager.clone());

        info!("Discord channel connecting to gateway...");

        tokio::spawn(async move {
            match client.start().await {
                Ok(()) => info!("discord session closed"),
                Err(e) => error!("discord session ended: {e}"),
            }
        });

        Ok(rx)
    }

    fn self_id(&self) -> Option<String> {
        self.self_id.get().map(|id| id.to_string())
    }

    async fn fetch_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Option<SourceMessage>, PolyglotError> {
        let (Some(channel), Some(message)) = (parse_id(channel_id), parse_id(message_id)) else {
            warn!("discord: unparseable ids {channel_id}/{message_id}");
            return Ok(None);
        };

        match self
            .http
            .get_message(ChannelId::new(channel), MessageId::new(message))
            .await
        {
            Ok(msg) => Ok(Some(source_from_message(&msg))),
            Err(e) if is_inaccessible(&e) => {
                debug!("discord: message {message_id} in {channel_id} not accessible: {e}");
                Ok(None)
            }
            Err(e) => Err(PolyglotError::Channel(format!(
                "discord fetch of {message_id} failed: {e}"
            ))),
        }
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), PolyglotError> {
        self.send_text(message).await
    }

    async fn stop(&self) -> Result<(), PolyglotError> {
        if let Some(manager) = self.shard_manager.lock().await.take() {
            manager.shutdown_all().await;
        }
        info!("Discord channel stopped");
        Ok(())
    }
}
