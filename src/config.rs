use std::time::Duration;

use url::Url;

use crate::domain::services::chart_normalizer::HouseNumbering;

const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:8800/";

/// Server and engine-gateway configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the computation engine sidecar
    pub engine_url: Url,
    /// Timeout for a single engine query
    pub engine_timeout: Duration,
    /// House numbering policy for charts without cusp data
    pub house_numbering: HouseNumbering,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            engine_url: Url::parse(DEFAULT_ENGINE_URL)
                .expect("default engine url is well-formed"),
            engine_timeout: Duration::from_secs(30),
            house_numbering: HouseNumbering::SignBased,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, keeping the default
    /// for any value that is missing or malformed.
    pub fn from_env() -> ServerConfig {
        let mut config = ServerConfig::default();

        if let Ok(host) = std::env::var("KUNDALI_HOST") {
            if !host.trim().is_empty() {
                config.host = host;
            }
        }

        if let Ok(port) = std::env::var("KUNDALI_PORT") {
            match port.parse::<u16>() {
                Ok(value) => config.port = value,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse KUNDALI_PORT '{}': {}, using default: {}",
                        port,
                        e,
                        config.port
                    );
                }
            }
        }

        if let Ok(engine_url) = std::env::var("ENGINE_URL") {
            match Url::parse(&engine_url) {
                Ok(value) => config.engine_url = value,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse ENGINE_URL '{}': {}, using default: {}",
                        engine_url,
                        e,
                        config.engine_url
                    );
                }
            }
        }

        if let Ok(timeout) = std::env::var("ENGINE_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(value) if value > 0 => config.engine_timeout = Duration::from_secs(value),
                Ok(value) => {
                    tracing::warn!(
                        "Invalid ENGINE_TIMEOUT_SECS value: {} (must be positive), using default",
                        value
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse ENGINE_TIMEOUT_SECS '{}': {}, using default",
                        timeout,
                        e
                    );
                }
            }
        }

        if let Ok(policy) = std::env::var("HOUSE_NUMBERING") {
            match policy.to_lowercase().as_str() {
                "sign-based" => config.house_numbering = HouseNumbering::SignBased,
                "explicit-null" => config.house_numbering = HouseNumbering::ExplicitNull,
                other => {
                    tracing::warn!(
                        "Unknown HOUSE_NUMBERING '{}' (expected 'sign-based' or 'explicit-null'), using default",
                        other
                    );
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.engine_url.as_str(), DEFAULT_ENGINE_URL);
        assert_eq!(config.engine_timeout, Duration::from_secs(30));
        assert_eq!(config.house_numbering, HouseNumbering::SignBased);
    }

    #[test]
    fn test_engine_url_joins_paths() {
        let config = ServerConfig::default();
        let joined = config.engine_url.join("chart").unwrap();
        assert_eq!(joined.as_str(), "http://127.0.0.1:8800/chart");
    }
}
