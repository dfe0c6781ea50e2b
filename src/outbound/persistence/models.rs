//! Diesel row models and row-decoding routines for article records.
//!
//! Each record type has an explicit decode routine that checks the
//! invariants the database is expected to hold before the row is handed to
//! the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Article, ArticleListItem};

use super::schema::articles;

/// Decode failure for a fetched row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub(crate) struct RowDecodeError(String);

/// Queryable row for the article detail projection.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleRow {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
    pub like_count: i32,
    pub stock_count: i32,
    pub image_urls: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Queryable row for the article summary projection.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleSummaryRow {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub like_count: i32,
    pub stock_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for article creation.
#[derive(Debug, Insertable)]
#[diesel(table_name = articles)]
pub(crate) struct NewArticleRow<'a> {
    pub author_id: i64,
    pub title: &'a str,
    pub body: &'a str,
    pub like_count: i32,
    pub stock_count: i32,
}

fn check_invariants(
    id: i64,
    like_count: i32,
    stock_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Result<(), RowDecodeError> {
    if id <= 0 {
        return Err(RowDecodeError(format!("article id {id} is not positive")));
    }
    if like_count < 0 || stock_count < 0 {
        return Err(RowDecodeError(format!(
            "article {id} has negative counts (likes {like_count}, stocks {stock_count})"
        )));
    }
    if updated_at < created_at {
        return Err(RowDecodeError(format!(
            "article {id} was updated before it was created"
        )));
    }
    Ok(())
}

/// Convert a detail row into a domain article.
pub(crate) fn decode_article(row: ArticleRow) -> Result<Article, RowDecodeError> {
    check_invariants(
        row.id,
        row.like_count,
        row.stock_count,
        row.created_at,
        row.updated_at,
    )?;
    Ok(Article {
        id: row.id,
        author_id: row.author_id,
        title: row.title,
        body: row.body,
        like_count: row.like_count,
        stock_count: row.stock_count,
        image_urls: row.image_urls,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Convert a summary row into a list item.
pub(crate) fn decode_article_summary(
    row: ArticleSummaryRow,
) -> Result<ArticleListItem, RowDecodeError> {
    check_invariants(
        row.id,
        row.like_count,
        row.stock_count,
        row.created_at,
        row.updated_at,
    )?;
    Ok(ArticleListItem {
        id: row.id,
        author_id: row.author_id,
        title: row.title,
        like_count: row.like_count,
        stock_count: row.stock_count,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
