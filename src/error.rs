//! Unified error type for the image service.
//!
//! Every failure a handler can hit is a variant of [`Error`]. The `Display`
//! text is exactly the message sent back to the client, and
//! [`Error::http_status`] gives the status code it is sent with. Underlying
//! causes are kept as `source` for logging only.

use axum::http::StatusCode;

/// Unified error type covering all failure modes of the upload and
/// retrieval handlers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A method other than `POST` was used on the upload endpoint.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The multipart body could not be parsed, or exceeded the size limit.
    #[error("Bad Request: {0}")]
    Multipart(String),

    /// The multipart body had no file under the expected field name.
    #[error("Bad Request: File field missing")]
    MissingFile,

    /// The uploaded filename's extension is not in the allow-list.
    #[error("Bad Request: Extension not allowed")]
    ExtensionNotAllowed,

    /// The uploaded bytes could not be persisted.
    #[error("Internal Server Error: File can not be created")]
    FileNotCreated {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The storage directory could not be listed.
    #[error("Internal Server Error: Directory can not be read")]
    DirectoryUnreadable {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No stored file matches the requested ID.
    #[error("Not Found: File not found")]
    NotFound,

    /// The matched file exists but could not be opened.
    #[error("Internal Server Error: File can not be opened")]
    FileNotOpened {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The matched file was opened but its content could not be read.
    #[error("Internal Server Error: File can not be read")]
    FileNotRead {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Map this error to the HTTP status it is reported with.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::MissingFile => StatusCode::BAD_REQUEST,
            Error::ExtensionNotAllowed => StatusCode::BAD_REQUEST,
            Error::FileNotCreated { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::DirectoryUnreadable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::FileNotOpened { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FileNotRead { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convenience constructor for [`Error::FileNotCreated`].
    pub fn not_created(source: std::io::Error) -> Self {
        Error::FileNotCreated { source }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
