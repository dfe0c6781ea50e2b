//! Article API handlers.
//!
//! ```text
//! GET  /api/v1/articles
//! GET  /api/v1/articles/{id}
//! POST /api/v1/articles
//! ```
//!
//! Handlers derive typed input from the request, call the article ports,
//! and write JSON on success. Failures are returned as domain errors; the
//! dispatch boundary turns them into wire responses.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Article, ArticleListItem, CreateArticleRequest, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Author recorded on created articles until authentication is wired.
const DEFAULT_AUTHOR_ID: i64 = 1;

/// Response body for `GET /api/v1/articles`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleListBody {
    pub articles: Vec<ArticleListItem>,
}

/// List article summaries.
#[utoipa::path(
    get,
    path = "/api/v1/articles",
    responses(
        (status = 200, description = "Article summaries, newest first", body = ArticleListBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["articles"],
    operation_id = "listArticles"
)]
#[get("/articles")]
pub async fn list_articles(state: web::Data<HttpState>) -> ApiResult<web::Json<ArticleListBody>> {
    info!("article list requested");
    let articles = state.articles.list_articles().await?;
    Ok(web::Json(ArticleListBody { articles }))
}

/// Fetch one article by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Article detail", body = Article),
        (status = 400, description = "Invalid article id", body = ErrorBody),
        (status = 404, description = "Article not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["articles"],
    operation_id = "getArticle"
)]
#[get("/articles/{id}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Article>> {
    info!("article detail requested");
    let id = parse_article_id(path.as_str())?;
    let article = state.articles.get_article(id).await?;
    Ok(web::Json(article))
}

fn parse_article_id(raw: &str) -> Result<i64, Error> {
    raw.parse::<i64>()
        .map_err(|err| Error::invalid_article_id("article id must be an integer").with_cause(err))
}

/// Create an article.
///
/// The body is decoded from raw bytes so a malformed payload surfaces as
/// the API's own error code rather than the framework default.
#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Created article", body = Article),
        (status = 400, description = "Malformed JSON body", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["articles"],
    operation_id = "createArticle"
)]
#[post("/articles")]
pub async fn create_article(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    info!("article create requested");
    let request: CreateArticleRequest = serde_json::from_slice(&body)
        .map_err(|err| Error::invalid_json("request body is not valid JSON").with_cause(err))?;
    let article = state
        .article_commands
        .create_article(request, DEFAULT_AUTHOR_ID)
        .await?;
    Ok(HttpResponse::Created().json(article))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test as actix_test, web};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{ArticlesCommand, ArticlesQuery};

    fn sample_article(id: i64) -> Article {
        let created = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("timestamp");
        Article {
            id,
            author_id: 1,
            title: "Shio ramen in Kanda".to_owned(),
            body: "A long write-up.".to_owned(),
            like_count: 0,
            stock_count: 0,
            image_urls: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn summary_of(article: &Article) -> ArticleListItem {
        ArticleListItem {
            id: article.id,
            author_id: article.author_id,
            title: article.title.clone(),
            like_count: article.like_count,
            stock_count: article.stock_count,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }

    struct StubArticles {
        articles: Vec<Article>,
    }

    #[async_trait]
    impl ArticlesQuery for StubArticles {
        async fn list_articles(&self) -> Result<Vec<ArticleListItem>, Error> {
            Ok(self.articles.iter().map(summary_of).collect())
        }

        async fn get_article(&self, id: i64) -> Result<Article, Error> {
            if id <= 0 {
                return Err(Error::invalid_article_id("article id must be positive"));
            }
            self.articles
                .iter()
                .find(|article| article.id == id)
                .cloned()
                .ok_or_else(|| Error::article_not_found("article not found"))
        }
    }

    #[async_trait]
    impl ArticlesCommand for StubArticles {
        async fn create_article(
            &self,
            request: CreateArticleRequest,
            author_id: i64,
        ) -> Result<Article, Error> {
            let mut article = sample_article(42);
            article.title = request.title;
            article.body = request.body;
            article.author_id = author_id;
            Ok(article)
        }
    }

    fn test_app(
        stub: Arc<StubArticles>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(stub.clone(), stub);
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(list_articles)
                .service(get_article)
                .service(create_article),
        )
    }

    fn empty_stub() -> Arc<StubArticles> {
        Arc::new(StubArticles { articles: vec![] })
    }

    #[actix_web::test]
    async fn list_returns_empty_array_not_null() {
        let app = actix_test::init_service(test_app(empty_stub())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/articles")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value.get("articles"), Some(&serde_json::json!([])));
    }

    #[actix_web::test]
    async fn list_items_use_camel_case_and_omit_body() {
        let stub = Arc::new(StubArticles {
            articles: vec![sample_article(1)],
        });
        let app = actix_test::init_service(test_app(stub)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/articles")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        let first = &value["articles"].as_array().expect("array")[0];
        assert!(first.get("likeCount").is_some());
        assert!(first.get("body").is_none());
        assert!(first.get("like_count").is_none());
    }

    #[actix_web::test]
    async fn get_with_non_numeric_id_is_invalid_article_id() {
        let app = actix_test::init_service(test_app(empty_stub())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/articles/abc")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("INVALID_ARTICLE_ID")
        );
    }

    #[actix_web::test]
    async fn get_with_non_positive_id_is_invalid_article_id() {
        let app = actix_test::init_service(test_app(empty_stub())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/articles/0")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn get_missing_article_is_not_found() {
        let app = actix_test::init_service(test_app(empty_stub())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/articles/99")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("ARTICLE_NOT_FOUND")
        );
    }

    #[actix_web::test]
    async fn get_existing_article_returns_detail() {
        let stub = Arc::new(StubArticles {
            articles: vec![sample_article(7)],
        });
        let app = actix_test::init_service(test_app(stub)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/articles/7")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value.get("id").and_then(Value::as_i64), Some(7));
        assert_eq!(
            value.get("title").and_then(Value::as_str),
            Some("Shio ramen in Kanda")
        );
    }

    #[actix_web::test]
    async fn post_with_malformed_body_is_invalid_json() {
        let app = actix_test::init_service(test_app(empty_stub())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/articles")
                .insert_header(("content-type", "application/json"))
                .set_payload("{")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("INVALID_JSON")
        );
    }

    #[actix_web::test]
    async fn post_creates_article_with_placeholder_author() {
        let app = actix_test::init_service(test_app(empty_stub())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/articles")
                .set_json(serde_json::json!({"title": "T", "body": "B"}))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value.get("title").and_then(Value::as_str), Some("T"));
        assert_eq!(value.get("authorId").and_then(Value::as_i64), Some(1));
        assert_eq!(value.get("likeCount").and_then(Value::as_i64), Some(0));
    }
}
