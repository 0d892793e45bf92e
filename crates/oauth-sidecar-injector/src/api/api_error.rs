use axum::{http::StatusCode, response::IntoResponse};

use crate::errors::InjectorError;

#[derive(Debug)]
/// An error that can be returned by the API.
/// The API server reads the body as plain text, so the message is sent as is.
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl From<InjectorError> for ApiError {
    fn from(error: InjectorError) -> Self {
        let status = if error.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
