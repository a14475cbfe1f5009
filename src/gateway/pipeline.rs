//! Reaction processing pipeline — filter, length guard, relay, publish.

use super::Gateway;
use polyglot_core::{
    error::TranslateError,
    languages::LanguageMap,
    message::{OutgoingMessage, ReactionEvent, SourceMessage, TranslationRequest},
    traits::{Channel, Translator},
};
use tracing::{debug, error, info, warn};

/// Longest message, in characters, that will be sent for translation.
pub(crate) const MAX_TEXT_CHARS: usize = 5000;

pub(crate) const TOO_LONG_MESSAGE: &str = "⚠️ Message too long to translate.";
pub(crate) const FAILED_MESSAGE: &str = "⚠️ Translation failed.";

/// Why an event was dropped without any chat output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dropped {
    SelfReaction,
    UnknownEmoji,
    UnknownChannel,
    Unresolved,
    FetchFailed,
    EmptyText,
    BotAuthor,
}

/// Terminal state of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Dropped(Dropped),
    TooLong,
    Translated,
    Failed,
}

/// An event that passed the filter.
struct Accepted {
    source: SourceMessage,
    target: String,
}

pub(crate) fn exceeds_limit(text: &str) -> bool {
    text.chars().count() > MAX_TEXT_CHARS
}

pub(crate) fn format_translation(code: &str, translated: &str) -> String {
    format!("**Translated to {code}:**\n{translated}")
}

/// One translation attempt. The cause of a failure is logged here and
/// nowhere else.
pub(crate) async fn relay(
    translator: &dyn Translator,
    text: &str,
    code: &str,
) -> Result<String, TranslateError> {
    let request = TranslationRequest::auto(text, code);
    match translator.translate(&request).await {
        Ok(translated) => Ok(translated),
        Err(e) => {
            warn!("{} failed for target {code}: {e}", translator.name());
            Err(e)
        }
    }
}

/// Decide whether `event` warrants a translation. Fetches the message.
async fn filter_reaction(
    channel: &dyn Channel,
    languages: &LanguageMap,
    event: &ReactionEvent,
) -> Result<Accepted, Dropped> {
    if channel.self_id().as_deref() == Some(event.user_id.as_str()) {
        return Err(Dropped::SelfReaction);
    }

    let target = languages
        .code_for(&event.emoji)
        .ok_or(Dropped::UnknownEmoji)?
        .to_string();

    let source = match channel
        .fetch_message(&event.channel_id, &event.message_id)
        .await
    {
        Ok(Some(m)) => m,
        Ok(None) => return Err(Dropped::Unresolved),
        Err(e) => {
            warn!(
                "[{}] could not fetch message {}: {e}",
                event.channel, event.message_id
            );
            return Err(Dropped::FetchFailed);
        }
    };

    if source.text.is_empty() {
        return Err(Dropped::EmptyText);
    }
    if source.author_is_bot {
        return Err(Dropped::BotAuthor);
    }

    Ok(Accepted { source, target })
}

async fn post(channel: &dyn Channel, message: OutgoingMessage) {
    if let Err(e) = channel.send(message).await {
        error!("failed to send message on {}: {e}", channel.name());
    }
}

/// Run one reaction event through the full pipeline.
pub(crate) async fn process_reaction(
    channel: &dyn Channel,
    translator: &dyn Translator,
    languages: &LanguageMap,
    event: &ReactionEvent,
) -> Outcome {
    let Accepted { source, target } = match filter_reaction(channel, languages, event).await {
        Ok(accepted) => accepted,
        Err(reason) => {
            debug!(
                "[{}] dropped reaction {} on {}: {reason:?}",
                event.channel, event.emoji, event.message_id
            );
            return Outcome::Dropped(reason);
        }
    };

    info!(
        "[{}] {} on {} -> {target} ({} chars)",
        event.channel,
        event.emoji,
        source.id,
        source.text.chars().count()
    );

    if exceeds_limit(&source.text) {
        post(
            channel,
            OutgoingMessage::to_channel(&source.channel_id, TOO_LONG_MESSAGE),
        )
        .await;
        return Outcome::TooLong;
    }

    match relay(translator, &source.text, &target).await {
        Ok(translated) => {
            post(
                channel,
                OutgoingMessage::reply(&source, format_translation(&target, &translated)),
            )
            .await;
            Outcome::Translated
        }
        Err(_) => {
            post(
                channel,
                OutgoingMessage::to_channel(&source.channel_id, FAILED_MESSAGE),
            )
            .await;
            Outcome::Failed
        }
    }
}

impl Gateway {
    /// Route an event to its channel and process it.
    pub(super) async fn handle_reaction(&self, event: ReactionEvent) -> Outcome {
        let Some(channel) = self.channels.get(&event.channel) else {
            warn!("reaction from unknown channel {}", event.channel);
            return Outcome::Dropped(Dropped::UnknownChannel);
        };

        process_reaction(
            channel.as_ref(),
            self.translator.as_ref(),
            &self.languages,
            &event,
        )
        .await
    }
}
