//! Domain records, errors, ports, and services.
//!
//! Everything in this module is transport agnostic. Inbound adapters map
//! these types onto HTTP; outbound adapters implement the driven ports
//! against PostgreSQL.

pub mod article;
pub mod articles_service;
pub mod error;
pub mod ports;

pub use article::{Article, ArticleListItem, CreateArticleRequest};
pub use articles_service::ArticleService;
pub use error::{Error, ErrorCode};
