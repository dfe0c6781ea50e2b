//! Application configuration loaded from the environment.

use url::Url;

const PORT_VAR: &str = "SERVER_PORT";
const BASE_URL_VAR: &str = "API_BASE_URL";
const DATABASE_URL_VAR: &str = "DATABASE_URL";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
const DEFAULT_DATABASE_URL: &str = "postgres://user:password@db:5432/ramen_blog?sslmode=disable";

/// Errors raised while reading the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The port variable did not parse as a TCP port.
    #[error("{name} is not a valid port: {value}")]
    InvalidPort { name: &'static str, value: String },
    /// The base URL variable did not parse as a URL.
    #[error("{name} is not a valid URL: {value}")]
    InvalidUrl { name: &'static str, value: String },
}

/// Typed application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    port: u16,
    base_url: Url,
    database_url: String,
}

impl AppConfig {
    /// Load configuration from process environment variables, applying
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup(PORT_VAR) {
            Some(value) => match value.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    return Err(ConfigError::InvalidPort {
                        name: PORT_VAR,
                        value,
                    });
                }
            },
            None => DEFAULT_PORT,
        };

        let raw_base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let base_url = match Url::parse(&raw_base_url) {
            Ok(url) => url,
            Err(_) => {
                return Err(ConfigError::InvalidUrl {
                    name: BASE_URL_VAR,
                    value: raw_base_url,
                });
            }
        };

        let database_url =
            lookup(DATABASE_URL_VAR).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        Ok(Self {
            port,
            base_url,
            database_url,
        })
    }

    /// Port the HTTP server binds to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Public base URL of the API.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// PostgreSQL connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|value| (*value).to_owned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = AppConfig::from_lookup(|_| None).expect("config");
        assert_eq!(config.port(), 8080);
        assert_eq!(config.base_url().as_str(), "http://localhost:8080/api/v1");
        assert_eq!(
            config.database_url(),
            "postgres://user:password@db:5432/ramen_blog?sslmode=disable"
        );
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars = [
            ("SERVER_PORT", "9090"),
            ("API_BASE_URL", "https://blog.example.com/api/v1"),
            ("DATABASE_URL", "postgres://app@pg:5432/blog"),
        ];
        let config = AppConfig::from_lookup(lookup_from(&vars)).expect("config");
        assert_eq!(config.port(), 9090);
        assert_eq!(config.base_url().host_str(), Some("blog.example.com"));
        assert_eq!(config.database_url(), "postgres://app@pg:5432/blog");
    }

    #[rstest]
    #[case("not-a-port")]
    #[case("70000")]
    #[case("-1")]
    fn invalid_port_is_rejected(#[case] value: &str) {
        let vars = [("SERVER_PORT", value)];
        let err = AppConfig::from_lookup(lookup_from(&vars)).expect_err("invalid port");
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let vars = [("API_BASE_URL", "not a url")];
        let err = AppConfig::from_lookup(lookup_from(&vars)).expect_err("invalid url");
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
