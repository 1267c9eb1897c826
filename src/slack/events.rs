use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Subtype Slack sets on messages posted by bots and integrations.
pub const BOT_MESSAGE_SUBTYPE: &str = "bot_message";

/// Top-level Events API request body
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub challenge: Option<String>,
    /// Left untyped: other event types put objects in `channel` or `user`.
    pub event: Option<Value>,
}

impl EventEnvelope {
    /// The inner event if it is a `message`. Anything else is skipped.
    pub fn message_event(&self) -> Option<MessageEvent> {
        let event = self.event.as_ref()?;
        if event.get("type").and_then(Value::as_str) != Some("message") {
            return None;
        }

        match MessageEvent::deserialize(event) {
            Ok(message) => Some(message),
            Err(e) => {
                warn!("Skipping malformed message event: {e}");
                None
            }
        }
    }
}

/// Inner `event` object of a `message` event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageEvent {
    pub subtype: Option<String>,
    pub text: Option<String>,
    pub channel: Option<String>,
    pub user: Option<String>,
    pub bot_id: Option<String>,
}

impl MessageEvent {
    /// True for messages written by a bot, including our own posts.
    pub fn is_bot_authored(&self, bot_user_id: Option<&str>) -> bool {
        if self.subtype.as_deref() == Some(BOT_MESSAGE_SUBTYPE) || self.bot_id.is_some() {
            return true;
        }

        matches!((bot_user_id, self.user.as_deref()), (Some(own), Some(user)) if own == user)
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub challenge: String,
}
