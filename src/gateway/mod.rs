//! Gateway — the main event loop connecting channels and the translator.
//!
//! Each reaction event is handled in its own task; in-flight tasks are
//! drained on shutdown.

mod pipeline;


pub(crate) use pipeline::{
    exceeds_limit, format_translation, relay, FAILED_MESSAGE, TOO_LONG_MESSAGE,
};

use polyglot_core::{
    languages::LanguageMap,
    message::ReactionEvent,
    traits::{Channel, Translator},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// The central gateway that routes reaction events to the translator.
pub struct Gateway {
    pub(super) translator: Arc<dyn Translator>,
    pub(super) channels: HashMap<String, Arc<dyn Channel>>,
    pub(super) languages: Arc<LanguageMap>,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        translator: Arc<dyn Translator>,
        channels: HashMap<String, Arc<dyn Channel>>,
        languages: LanguageMap,
    ) -> Self {
        Self {
            translator,
            channels,
            languages: Arc::new(languages),
        }
    }

    /// Run the main event loop until every channel closes or Ctrl-C.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "Polyglot gateway running | translator: {} | channels: {} | flags: {}",
            self.translator.name(),
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            self.languages.len(),
        );

        let (tx, mut rx) = mpsc::channel::<ReactionEvent>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(event) = channel_rx.recv().await {
                    if tx.send(event).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                event = rx.recv() => {
                    let Some(event) = event else {
                        info!("All channels closed");
                        break;
                    };
                    let gw = self.clone();
                    in_flight.spawn(async move {
                        gw.handle_reaction(event).await;
                    });
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        warn!("reaction task aborted: {e}");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown(in_flight).await;
        Ok(())
    }

    /// Finish in-flight events, then stop all channels.
    async fn shutdown(&self, mut in_flight: JoinSet<()>) {
        info!("Shutting down...");

        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                warn!("reaction task aborted: {e}");
            }
        }

        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }

        info!("Shutdown complete.");
    }
}
