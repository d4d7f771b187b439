//! Error types for the todolist client.
//!
//! # Design
//! `ApiError` covers a single remote call. `StoreError` and `AuthError` wrap
//! it for the list store and the sign-in/sign-up flows, adding the failures
//! those layers detect locally before any request is sent.

use thiserror::Error;

/// Errors returned by request builders, response parsers and transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 401; credentials are missing or expired.
    #[error("unauthorized")]
    Unauthorized,

    /// The server returned a non-2xx status other than 401/404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never completed.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no todo with id {0}")]
    UnknownTodo(i64),

    #[error("index {index} out of range for {len} displayed todos")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("todo content must not be empty")]
    EmptyContent,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Form field an authentication error is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    PasswordConfirmation,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::PasswordConfirmation => "password_confirmation",
        };
        f.write_str(name)
    }
}

/// Errors returned by sign-in, sign-up and sign-out.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A form value failed local validation; no request was sent.
    #[error("{field}: {message}")]
    Validation { field: Field, message: String },

    /// The server rejected the request with a list of error messages.
    #[error("{field}: {}", .messages.join(", "))]
    Rejected { field: Field, messages: Vec<String> },

    /// The request never completed.
    #[error("network error, please try again later: {0}")]
    Network(String),

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Storage(#[from] CredentialStoreError),
}

impl AuthError {
    /// The form field this error should be shown next to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            AuthError::Validation { field, .. } | AuthError::Rejected { field, .. } => Some(*field),
            AuthError::Network(_) => Some(Field::Email),
            AuthError::Api(_) | AuthError::Storage(_) => None,
        }
    }
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(msg) => AuthError::Network(msg),
            other => AuthError::Api(other),
        }
    }
}

/// Errors from persisting credentials.
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("credential storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
