//! Article records exchanged between layers.
//!
//! These are plain data records: identifiers, counts, and timestamps are
//! assigned by the database, and every layer passes them by value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full article record (detail view).
///
/// # Examples
/// ```
/// use ramen_blog::domain::Article;
///
/// let json = serde_json::json!({
///     "id": 1,
///     "authorId": 1,
///     "title": "Shio ramen in Kanda",
///     "body": "A long write-up.",
///     "likeCount": 0,
///     "stockCount": 0,
///     "imageUrls": null,
///     "createdAt": "2024-05-01T12:00:00Z",
///     "updatedAt": "2024-05-01T12:00:00Z",
/// });
/// let article: Article = serde_json::from_value(json).expect("article JSON");
/// assert_eq!(article.id, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Identifier assigned by the database, always positive.
    pub id: i64,
    /// Authoring user.
    pub author_id: i64,
    pub title: String,
    pub body: String,
    /// Number of likes, never negative.
    pub like_count: i32,
    /// Number of stocks (bookmarks), never negative.
    pub stock_count: i32,
    /// Attached image URLs in display order, absent when none were uploaded.
    pub image_urls: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Summary projection of [`Article`] used by list views.
///
/// Omits `body` and `image_urls`; every identifier in a list result
/// resolves through the detail fetch against the same table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListItem {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub like_count: i32,
    pub stock_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input payload for creating an article.
///
/// Becomes an [`Article`] once stored with server-assigned identifier,
/// timestamps, and zeroed counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::Value;

    use super::*;

    fn sample_article() -> Article {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("timestamp");
        Article {
            id: 7,
            author_id: 1,
            title: "Tonkotsu tour".to_owned(),
            body: "Five shops in one day.".to_owned(),
            like_count: 3,
            stock_count: 1,
            image_urls: Some(vec!["https://example.com/bowl.jpg".to_owned()]),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn article_serializes_with_camel_case_names() {
        let value = serde_json::to_value(sample_article()).expect("article JSON");
        let object = value.as_object().expect("object");
        for key in [
            "id",
            "authorId",
            "title",
            "body",
            "likeCount",
            "stockCount",
            "imageUrls",
            "createdAt",
            "updatedAt",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert!(!object.contains_key("author_id"));
    }

    #[test]
    fn absent_image_urls_serialize_as_null() {
        let mut article = sample_article();
        article.image_urls = None;
        let value = serde_json::to_value(article).expect("article JSON");
        assert_eq!(value.get("imageUrls"), Some(&Value::Null));
    }

    #[test]
    fn list_item_omits_body_and_image_urls() {
        let article = sample_article();
        let item = ArticleListItem {
            id: article.id,
            author_id: article.author_id,
            title: article.title.clone(),
            like_count: article.like_count,
            stock_count: article.stock_count,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        let value = serde_json::to_value(item).expect("list item JSON");
        let object = value.as_object().expect("object");
        assert!(!object.contains_key("body"));
        assert!(!object.contains_key("imageUrls"));
        assert_eq!(object.get("title"), Some(&Value::from("Tonkotsu tour")));
    }

    #[test]
    fn create_request_round_trips() {
        let request: CreateArticleRequest =
            serde_json::from_str(r#"{"title":"T","body":"B"}"#).expect("request JSON");
        assert_eq!(request.title, "T");
        assert_eq!(request.body, "B");
    }
}
