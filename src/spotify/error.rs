use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no Spotify credentials available, authorize the app first")]
    AuthenticationUnavailable,

    #[error("no Spotify playlist configured")]
    PlaylistNotConfigured,

    #[error("Spotify responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[source] Box<ureq::Transport>),

    #[error("failed to decode Spotify response: {0}")]
    Decode(#[source] std::io::Error),
}

impl From<ureq::Error> for CatalogError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => CatalogError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => CatalogError::Transport(Box::new(transport)),
        }
    }
}
