//! PostgreSQL persistence via Diesel with async pooling.

mod diesel_article_repository;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use pool::{DbPool, PoolError};
