use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Slack responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[source] Box<ureq::Transport>),

    #[error("failed to decode Slack response: {0}")]
    Decode(#[source] std::io::Error),

    #[error("Slack API error: {0}")]
    Api(String),
}

impl From<ureq::Error> for SlackError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => SlackError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => SlackError::Transport(Box::new(transport)),
        }
    }
}
