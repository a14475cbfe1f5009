use crate::{
    error::{PolyglotError, TranslateError},
    message::{OutgoingMessage, ReactionEvent, SourceMessage, TranslationRequest},
};
use async_trait::async_trait;

/// Translation backend — the relay.
///
/// Every translation service (LibreTranslate, self-hosted mirrors, test
/// fakes) implements this trait so the pipeline never sees HTTP details.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable translator name.
    fn name(&self) -> &str;

    /// Issue exactly one translation call. No retries.
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError>;

    /// Check if the translation endpoint is reachable.
    async fn is_available(&self) -> bool;
}

/// Messaging Channel trait — the event gateway.
///
/// Every chat platform implements this trait to deliver reaction events
/// and to read and write messages.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for reaction events.
    /// Returns a receiver that yields events until the session ends.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<ReactionEvent>, PolyglotError>;

    /// The bot's own user ID, once the session is ready.
    fn self_id(&self) -> Option<String>;

    /// Fetch a message by conversation and message ID.
    ///
    /// `Ok(None)` means the conversation or message could not be resolved.
    async fn fetch_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Option<SourceMessage>, PolyglotError>;

    /// Send a message, as a reply when `reply_to` is set.
    async fn send(&self, message: OutgoingMessage) -> Result<(), PolyglotError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), PolyglotError>;
}
