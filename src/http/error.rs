use rouille::Response;

use crate::spotify::CatalogError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    BadGateway(String),
    Internal(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Status { .. } | CatalogError::Transport(_) | CatalogError::Decode(_) => {
                ApiError::BadGateway(format!("Authentication failed: {err}"))
            }

            CatalogError::AuthenticationUnavailable | CatalogError::PlaylistNotConfigured => {
                ApiError::Internal("internal server error".into())
            }
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::BadGateway(_) => 502,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::BadRequest(msg) | ApiError::BadGateway(msg) | ApiError::Internal(msg) => {
                Response::text(msg).with_status_code(status)
            }
        }
    }
}
