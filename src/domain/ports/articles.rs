//! Driving ports for article use-cases.
//!
//! HTTP handlers depend on these traits so they stay testable without
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Article, ArticleListItem, CreateArticleRequest, Error};

/// Use-case port for article reads.
#[async_trait]
pub trait ArticlesQuery: Send + Sync {
    /// Return all article summaries.
    async fn list_articles(&self) -> Result<Vec<ArticleListItem>, Error>;

    /// Return the article with the given identifier.
    async fn get_article(&self, id: i64) -> Result<Article, Error>;
}

/// Use-case port for article writes.
#[async_trait]
pub trait ArticlesCommand: Send + Sync {
    /// Create an article on behalf of the given author.
    async fn create_article(
        &self,
        request: CreateArticleRequest,
        author_id: i64,
    ) -> Result<Article, Error>;
}
