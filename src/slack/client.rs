use log::debug;
use serde::Deserialize;
use serde_json::json;

use super::{Notifier, SlackError};

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Web API client authenticated with the bot token.
pub struct SlackClient {
    http: ureq::Agent,
    bot_token: String,
}

/// Envelope of every Web API response
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
}

impl SlackClient {
    pub fn new(http: ureq::Agent, bot_token: impl Into<String>) -> Self {
        Self {
            http,
            bot_token: bot_token.into(),
        }
    }
}

impl Notifier for SlackClient {
    fn post_message(&self, channel: &str, text: &str) -> Result<(), SlackError> {
        debug!("chat.postMessage to {channel}: {text}");

        let response: ApiResponse = self
            .http
            .post(POST_MESSAGE_URL)
            .set("Authorization", &format!("Bearer {}", self.bot_token))
            .send_json(json!({ "channel": channel, "text": text }))?
            .into_json()
            .map_err(SlackError::Decode)?;

        if response.ok {
            Ok(())
        } else {
            Err(SlackError::Api(
                response.error.unwrap_or_else(|| "unknown_error".to_string()),
            ))
        }
    }
}
