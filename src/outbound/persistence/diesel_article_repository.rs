//! PostgreSQL-backed `ArticleRepository` implementation using Diesel.
//!
//! Failures are classified by where they occur on the access path:
//! statement execution, row-stream iteration, row decoding, and insertion.
//! Every method logs entry and completion so the data layer stays
//! observable without instrumentation above it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use futures_util::StreamExt;
use tracing::{debug, error};

use crate::domain::ports::{ArticleRepository, ArticleRepositoryError};
use crate::domain::{Article, ArticleListItem, CreateArticleRequest};

use super::models::{
    ArticleRow, ArticleSummaryRow, NewArticleRow, decode_article, decode_article_summary,
};
use super::pool::{DbPool, PoolError};
use super::schema::articles;

/// Diesel-backed implementation of the article repository port.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ArticleRepositoryError {
    ArticleRepositoryError::database(error.to_string())
}

fn map_find_error(error: diesel::result::Error) -> ArticleRepositoryError {
    match error {
        diesel::result::Error::NotFound => ArticleRepositoryError::NotFound,
        other => ArticleRepositoryError::database(other.to_string()),
    }
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn list(&self) -> Result<Vec<ArticleListItem>, ArticleRepositoryError> {
        debug!("listing articles");
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The row stream borrows the connection, so every return below
        // drops the cursor and releases the connection back to the pool.
        let rows = articles::table
            .order((articles::created_at.desc(), articles::id.desc()))
            .select(ArticleSummaryRow::as_select())
            .load_stream::<ArticleSummaryRow>(&mut conn)
            .await
            .map_err(|err| {
                error!(error = %err, "article list query failed");
                ArticleRepositoryError::database(err.to_string())
            })?;
        let mut rows = std::pin::pin!(rows);

        let mut items = Vec::new();
        while let Some(row) = rows.next().await {
            let row = row.map_err(|err| {
                error!(error = %err, "article row stream failed");
                ArticleRepositoryError::rows(err.to_string())
            })?;
            let item = decode_article_summary(row).map_err(|err| {
                error!(error = %err, "article row decode failed");
                ArticleRepositoryError::scan(err.to_string())
            })?;
            items.push(item);
        }

        debug!(count = items.len(), "listed articles");
        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Article, ArticleRepositoryError> {
        debug!(id, "fetching article");
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = articles::table
            .filter(articles::id.eq(id))
            .select(ArticleRow::as_select())
            .first::<ArticleRow>(&mut conn)
            .await
            .map_err(|err| {
                if !matches!(err, diesel::result::Error::NotFound) {
                    error!(id, error = %err, "article fetch failed");
                }
                map_find_error(err)
            })?;

        let article = decode_article(row).map_err(|err| {
            error!(id, error = %err, "article row decode failed");
            ArticleRepositoryError::database(err.to_string())
        })?;
        debug!(id, "fetched article");
        Ok(article)
    }

    async fn insert(
        &self,
        request: CreateArticleRequest,
        author_id: i64,
    ) -> Result<Article, ArticleRepositoryError> {
        debug!(author_id, "creating article");
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ArticleRepositoryError::insert(err.to_string()))?;

        let new_row = NewArticleRow {
            author_id,
            title: &request.title,
            body: &request.body,
            like_count: 0,
            stock_count: 0,
        };

        // RETURNING brings back the server-assigned identifier and
        // timestamps in a single round trip.
        let row = diesel::insert_into(articles::table)
            .values(&new_row)
            .returning(ArticleRow::as_returning())
            .get_result::<ArticleRow>(&mut conn)
            .await
            .map_err(|err| {
                error!(author_id, error = %err, "article insert failed");
                ArticleRepositoryError::insert(err.to_string())
            })?;

        let article = decode_article(row).map_err(|err| {
            error!(error = %err, "created article row decode failed");
            ArticleRepositoryError::insert(err.to_string())
        })?;
        debug!(id = article.id, "created article");
        Ok(article)
    }
}
