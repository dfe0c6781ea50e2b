//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data` so they depend
//! only on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ArticlesCommand, ArticlesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub articles: Arc<dyn ArticlesQuery>,
    pub article_commands: Arc<dyn ArticlesCommand>,
}

impl HttpState {
    /// Bundle the article ports for handler injection.
    pub fn new(
        articles: Arc<dyn ArticlesQuery>,
        article_commands: Arc<dyn ArticlesCommand>,
    ) -> Self {
        Self {
            articles,
            article_commands,
        }
    }
}
