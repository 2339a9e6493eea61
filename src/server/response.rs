//! Plain-text responses and error-to-HTTP conversion.
//!
//! Every non-success response of the service goes through [`text_response`],
//! including the rendering of [`crate::Error`] values returned by handlers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::Error;

/// Content type of every plain-text response.
pub const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";

/// Build a plain-text response carrying `message` followed by a newline.
pub fn text_response(status: StatusCode, message: impl Into<String>) -> Response {
    let mut body = message.into();
    body.push('\n');

    (status, [(header::CONTENT_TYPE, TEXT_PLAIN_UTF_8)], body).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.http_status();

        if status.is_server_error() {
            match std::error::Error::source(&self) {
                Some(source) => tracing::error!(
                    status = %status,
                    error = %self,
                    cause = %source,
                    "Server error in image handler"
                ),
                None => tracing::error!(
                    status = %status,
                    error = %self,
                    "Server error in image handler"
                ),
            }
        } else {
            tracing::debug!(status = %status, error = %self, "Rejected request");
        }

        text_response(status, self.to_string())
    }
}
