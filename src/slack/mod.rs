//! Slack: inbound Events API payloads and outbound chat messages.

pub mod client;
pub mod error;
pub mod events;

pub use error::SlackError;

/// Posts status messages back to a chat channel.
pub trait Notifier: Send + Sync {
    fn post_message(&self, channel: &str, text: &str) -> Result<(), SlackError>;
}
