//! OpenAPI document assembled from handler annotations.

use utoipa::OpenApi;

/// Aggregated OpenAPI description of the HTTP surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::articles::list_articles,
        crate::inbound::http::articles::get_article,
        crate::inbound::http::articles::create_article,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        crate::domain::Article,
        crate::domain::ArticleListItem,
        crate::domain::CreateArticleRequest,
        crate::domain::ErrorCode,
        crate::inbound::http::articles::ArticleListBody,
        crate::inbound::http::error::ErrorBody,
    )),
    tags(
        (name = "articles", description = "Article listing, detail, and creation"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
