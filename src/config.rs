//! Configuration
//!
//! Resolves the orchestrator endpoint and account from environment
//! variables with documented defaults; CLI flags override both. Nothing is
//! persisted and nothing is prompted for.

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub project_id: String,
    pub ssl_enabled: bool,
    pub host: String,
    pub port: u16,
    pub api_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "openbaton".to_string(),
            project_id: "default".to_string(),
            ssl_enabled: true,
            host: "127.0.0.1".to_string(),
            port: 8443,
            api_version: "1".to_string(),
        }
    }
}

impl Config {
    /// Read the environment, falling back to the defaults above.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            username: env_or("NFVO_USERNAME", defaults.username),
            password: env_or("NFVO_PASSWORD", defaults.password),
            project_id: env_or("NFVO_PROJECT_ID", defaults.project_id),
            ssl_enabled: env_or("NFVO_SSL_ENABLED", defaults.ssl_enabled.to_string())
                .eq_ignore_ascii_case("true"),
            host: env_or("NFVO_IP", defaults.host),
            port: std::env::var("NFVO_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            api_version: env_or("NFVO_API_VERSION", defaults.api_version),
        }
    }

    /// `{scheme}://{host}:{port}`, scheme chosen by the ssl flag.
    pub fn endpoint(&self) -> String {
        let scheme = if self.ssl_enabled { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_table() {
        let config = Config::default();
        assert_eq!(config.username, "admin");
        assert_eq!(config.port, 8443);
        assert!(config.ssl_enabled);
        assert_eq!(config.api_version, "1");
    }

    #[test]
    fn endpoint_scheme_follows_the_ssl_flag() {
        let mut config = Config::default();
        assert_eq!(config.endpoint(), "https://127.0.0.1:8443");
        config.ssl_enabled = false;
        config.port = 8080;
        assert_eq!(config.endpoint(), "http://127.0.0.1:8080");
    }
}
