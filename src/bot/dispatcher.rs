use std::sync::Arc;

use log::{debug, info, warn};

use crate::{slack::events::MessageEvent, youtube::links::extract_video_urls};

use super::{processor::LinkProcessor, spawn::Spawn};

/// Turns chat messages into background link-processing runs.
pub struct MessageDispatcher {
    processor: Arc<LinkProcessor>,
    spawner: Arc<dyn Spawn>,
    bot_user_id: Option<String>,
}

impl MessageDispatcher {
    pub fn new(
        processor: Arc<LinkProcessor>,
        spawner: Arc<dyn Spawn>,
        bot_user_id: Option<String>,
    ) -> Self {
        Self {
            processor,
            spawner,
            bot_user_id,
        }
    }

    /// Starts one run per video link in the message and returns the
    /// canonical URLs that were started. Repeated links start repeated runs.
    pub fn dispatch(&self, event: &MessageEvent) -> Vec<String> {
        if event.is_bot_authored(self.bot_user_id.as_deref()) {
            debug!("Ignoring bot message");
            return Vec::new();
        }

        let urls = extract_video_urls(event.text());
        if urls.is_empty() {
            return urls;
        }

        let Some(channel) = event.channel.as_deref() else {
            warn!("Dropping {} YouTube URLs from a message without channel", urls.len());
            return Vec::new();
        };

        info!("Found {} YouTube URLs in message", urls.len());

        for url in &urls {
            let processor = Arc::clone(&self.processor);
            let url = url.clone();
            let channel = channel.to_string();

            self.spawner.spawn(Box::new(move || {
                processor.process(&url, &channel);
            }));
        }

        urls
    }
}
