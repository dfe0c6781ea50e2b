//! Driven port for article persistence.

use async_trait::async_trait;

use crate::domain::{Article, ArticleListItem, CreateArticleRequest};

/// Errors raised by article repository adapters.
///
/// Variants match the failure points of the SQL access path so the service
/// can surface each one as a distinct coded error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleRepositoryError {
    /// No row matched the requested identifier.
    #[error("article not found")]
    NotFound,
    /// The statement could not be executed.
    #[error("database error: {message}")]
    Database { message: String },
    /// A fetched row could not be decoded into a record.
    #[error("row decode failed: {message}")]
    Scan { message: String },
    /// The row stream failed after the statement executed.
    #[error("row stream failed: {message}")]
    Rows { message: String },
    /// The insert could not be completed.
    #[error("article insert failed: {message}")]
    Insert { message: String },
}

impl ArticleRepositoryError {
    /// Create a statement-execution error with the given message.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Create a row-decode error with the given message.
    pub fn scan(message: impl Into<String>) -> Self {
        Self::Scan {
            message: message.into(),
        }
    }

    /// Create a row-stream error with the given message.
    pub fn rows(message: impl Into<String>) -> Self {
        Self::Rows {
            message: message.into(),
        }
    }

    /// Create an insert error with the given message.
    pub fn insert(message: impl Into<String>) -> Self {
        Self::Insert {
            message: message.into(),
        }
    }
}

/// Port for reading and writing articles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// List article summaries, newest first.
    async fn list(&self) -> Result<Vec<ArticleListItem>, ArticleRepositoryError>;

    /// Fetch a single article by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Article, ArticleRepositoryError>;

    /// Insert a new article and return the stored record, including the
    /// server-assigned identifier and timestamps.
    async fn insert(
        &self,
        request: CreateArticleRequest,
        author_id: i64,
    ) -> Result<Article, ArticleRepositoryError>;
}
