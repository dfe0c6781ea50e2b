//! Article service: business-rule validation in front of the repository.
//!
//! This is the only layer that validates inputs; everything it cannot
//! handle is delegated to the repository port and the resulting failures
//! are surfaced as coded domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    ArticleRepository, ArticleRepositoryError, ArticlesCommand, ArticlesQuery,
};
use crate::domain::{Article, ArticleListItem, CreateArticleRequest, Error};

/// Map repository failures onto coded domain errors.
///
/// The mapping is one-to-one so repository-level failure codes reach the
/// wire unchanged.
fn map_repository_error(error: ArticleRepositoryError) -> Error {
    let coded = match &error {
        ArticleRepositoryError::NotFound => return Error::article_not_found("article not found"),
        ArticleRepositoryError::Database { .. } => Error::database("failed to query articles"),
        ArticleRepositoryError::Scan { .. } => Error::scan("failed to read article row"),
        ArticleRepositoryError::Rows { .. } => Error::rows("failed to iterate article rows"),
        ArticleRepositoryError::Insert { .. } => Error::create_article("failed to create article"),
    };
    coded.with_cause(error)
}

/// Validation layer between the HTTP handlers and the repository.
#[derive(Clone)]
pub struct ArticleService<R> {
    article_repo: Arc<R>,
}

impl<R> ArticleService<R> {
    /// Create a new service over the given repository.
    pub fn new(article_repo: Arc<R>) -> Self {
        Self { article_repo }
    }
}

#[async_trait]
impl<R> ArticlesQuery for ArticleService<R>
where
    R: ArticleRepository,
{
    async fn list_articles(&self) -> Result<Vec<ArticleListItem>, Error> {
        self.article_repo.list().await.map_err(map_repository_error)
    }

    async fn get_article(&self, id: i64) -> Result<Article, Error> {
        if id <= 0 {
            debug!(id, "rejected non-positive article id");
            return Err(Error::invalid_article_id("article id must be positive"));
        }
        self.article_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> ArticlesCommand for ArticleService<R>
where
    R: ArticleRepository,
{
    async fn create_article(
        &self,
        request: CreateArticleRequest,
        author_id: i64,
    ) -> Result<Article, Error> {
        self.article_repo
            .insert(request, author_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "articles_service_tests.rs"]
mod tests;
