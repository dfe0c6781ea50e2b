//! Backend entry point: logging, configuration, database pool, HTTP server.

use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ramen_blog::server::{self, config::AppConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return Err(std::io::Error::other(e));
        }
    };

    server::run(config).await
}
