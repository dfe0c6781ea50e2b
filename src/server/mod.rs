//! HTTP server wiring: dependency construction and route registration.

pub mod config;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::ApiDoc;
use crate::domain::ArticleService;
use crate::inbound::http::articles::{create_article, get_article, list_articles};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::middleware::{Cors, Dispatch};
use crate::outbound::persistence::{DbPool, DieselArticleRepository};

use self::config::AppConfig;

/// Assemble the actix `App` for the given handler state.
///
/// Shared between the server factory and integration tests so both run the
/// identical middleware stack and routes.
pub fn build_app(
    state: HttpState,
    health_state: web::Data<HealthState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(list_articles)
        .service(get_article)
        .service(create_article);

    // Middleware registered last runs first: CORS wraps the dispatch
    // boundary so preflights short-circuit and error responses still carry
    // the CORS headers.
    let app = App::new()
        .app_data(web::Data::new(state))
        .app_data(health_state)
        .wrap(Dispatch)
        .wrap(Cors)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Build dependencies from the configuration and serve until shutdown.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let pool = DbPool::connect(config.database_url())
        .await
        .map_err(std::io::Error::other)?;

    // Fail fast when the database is unreachable rather than on the first
    // request.
    pool.get().await.map_err(std::io::Error::other)?;

    let repository = Arc::new(DieselArticleRepository::new(pool));
    let service = Arc::new(ArticleService::new(repository));
    let state = HttpState::new(service.clone(), service);

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(state.clone(), server_health_state.clone()))
        .bind(("0.0.0.0", config.port()))?;

    info!(port = config.port(), base_url = %config.base_url(), "server starting");
    health_state.mark_ready();
    server.run().await
}
