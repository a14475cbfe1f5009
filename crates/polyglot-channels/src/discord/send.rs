//! Message conversion and sending: plain channel posts and replies.

use super::{parse_id, DiscordChannel, DISCORD_MAX_LEN};
use crate::utils::split_message;
use polyglot_core::{
    error::PolyglotError,
    message::{OutgoingMessage, SourceMessage},
};
use serenity::all::{ChannelId, CreateMessage, Message, MessageId};

/// Convert a fetched Discord message into the platform-neutral form.
pub(crate) fn source_from_message(msg: &Message) -> SourceMessage {
    SourceMessage {
        id: msg.id.to_string(),
        channel_id: msg.channel_id.to_string(),
        text: msg.content.clone(),
        author_is_bot: msg.author.bot,
    }
}

impl DiscordChannel {
    /// Post `message`, split to Discord's length limit.
    ///
    /// Only the first chunk carries the reply reference.
    pub(crate) async fn send_text(&self, message: OutgoingMessage) -> Result<(), PolyglotError> {
        let target = message
            .reply_target
            .as_deref()
            .ok_or_else(|| PolyglotError::Channel("no reply_target on outgoing message".into()))?;
        let channel = parse_id(target)
            .map(ChannelId::new)
            .ok_or_else(|| PolyglotError::Channel(format!("invalid discord channel_id '{target}'")))?;
        let reply_to = message.reply_to.as_deref().and_then(parse_id).map(MessageId::new);

        for (i, chunk) in split_message(&message.text, DISCORD_MAX_LEN)
            .into_iter()
            .enumerate()
        {
            let mut builder = CreateMessage::new().content(chunk);
            if let (0, Some(reply_id)) = (i, reply_to) {
                builder = builder.reference_message((channel, reply_id));
            }

            channel
                .send_message(&self.http, builder)
                .await
                .map_err(|e| PolyglotError::Channel(format!("discord send failed: {e}")))?;
        }

        Ok(())
    }
}
