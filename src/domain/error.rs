//! Domain-level error type.
//!
//! These errors are transport agnostic. The inbound HTTP adapter maps each
//! code onto a status and renders the wire body; the dispatch middleware
//! logs the cause chain before the response leaves the process.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The article identifier is malformed or non-positive.
    InvalidArticleId,
    /// The request body could not be decoded as JSON.
    InvalidJson,
    /// The requested article does not exist.
    ArticleNotFound,
    /// A database query could not be executed.
    DatabaseError,
    /// A fetched row could not be decoded into a record.
    ScanError,
    /// The row stream failed after the statement executed.
    RowsError,
    /// The article insert could not be completed.
    CreateArticleError,
    /// An unexpected error occurred on the server.
    InternalServerError,
}

type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Uniform application error.
///
/// Carries a stable code, a user-facing message, and an optional underlying
/// cause. The cause never reaches the wire: error bodies hold only code and
/// message.
///
/// # Examples
/// ```
/// use ramen_blog::domain::{Error, ErrorCode};
///
/// let err = Error::article_not_found("article not found");
/// assert_eq!(err.code(), ErrorCode::ArticleNotFound);
/// ```
#[derive(Debug, Clone)]
pub struct Error {
    code: ErrorCode,
    message: String,
    cause: Option<Cause>,
}

impl Error {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message shown to clients.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attach the underlying error that triggered this failure.
    ///
    /// The cause participates in `Display` and `source()` for logging but
    /// is never serialized.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidArticleId`].
    pub fn invalid_article_id(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArticleId, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidJson`].
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidJson, message)
    }

    /// Convenience constructor for [`ErrorCode::ArticleNotFound`].
    pub fn article_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ArticleNotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::DatabaseError`].
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Convenience constructor for [`ErrorCode::ScanError`].
    pub fn scan(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ScanError, message)
    }

    /// Convenience constructor for [`ErrorCode::RowsError`].
    pub fn rows(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RowsError, message)
    }

    /// Convenience constructor for [`ErrorCode::CreateArticleError`].
    pub fn create_article(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CreateArticleError, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalServerError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServerError, message)
    }
}

// Equality ignores the cause so errors compare by what clients observe.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.message == other.message
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}", self.message, cause),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}
