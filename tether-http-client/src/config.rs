//! HTTP client configuration.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::interceptor::Interceptor;
use crate::wiretap::WiretapConfig;
use crate::{HttpClientError, Result};

/// HTTP client configuration.
///
/// Cheap to clone; interceptors are shared behind `Arc`.
#[derive(Clone)]
pub struct HttpClientConfig {
    /// Base URL that relative request paths are appended to.
    pub base_url: Option<String>,
    /// Total request timeout, passed to the transport.
    pub timeout: Option<Duration>,
    /// Connection timeout, passed to the transport.
    pub connect_timeout: Option<Duration>,
    /// Default headers for all requests.
    pub default_headers: Vec<(String, String)>,
    /// User agent string.
    pub user_agent: String,
    /// Enable gzip compression.
    pub gzip: bool,
    /// Enable brotli compression.
    pub brotli: bool,
    /// Follow redirects.
    pub follow_redirects: bool,
    /// Maximum redirects to follow when following is enabled.
    pub max_redirects: usize,
    /// Turn non-2xx responses into [`ErrorKind`](crate::ErrorKind) errors.
    pub classify_responses: bool,
    /// Wiretap configuration.
    pub wiretap: WiretapConfig,
    /// Interceptors, outermost first.
    pub interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: None,
            connect_timeout: None,
            default_headers: Vec::new(),
            user_agent: format!("tether-http-client/{}", env!("CARGO_PKG_VERSION")),
            gzip: true,
            brotli: true,
            follow_redirects: false,
            max_redirects: 10,
            classify_responses: false,
            wiretap: WiretapConfig::default(),
            interceptors: Vec::new(),
        }
    }
}

impl std::fmt::Debug for HttpClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("default_headers", &self.default_headers)
            .field("user_agent", &self.user_agent)
            .field("gzip", &self.gzip)
            .field("brotli", &self.brotli)
            .field("follow_redirects", &self.follow_redirects)
            .field("max_redirects", &self.max_redirects)
            .field("classify_responses", &self.classify_responses)
            .field("wiretap", &self.wiretap)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl HttpClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Turn this configuration back into a builder.
    pub fn into_builder(self) -> HttpClientConfigBuilder {
        HttpClientConfigBuilder { config: self }
    }

    /// Load configuration from `{PREFIX}_*` environment variables on top of
    /// the defaults. A `.env` file is read first when present.
    ///
    /// Recognised keys: `BASE_URL`, `TIMEOUT_SECS`, `CONNECT_TIMEOUT_SECS`,
    /// `USER_AGENT`, `WIRETAP`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(prefix, |key| env::var(key).ok())
    }

    fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("{}_{}", prefix, key));
        let mut builder = Self::builder();

        if let Some(url) = var("BASE_URL") {
            builder = builder.base_url(url);
        }
        if let Some(secs) = var("TIMEOUT_SECS") {
            builder = builder.timeout(parse_secs("TIMEOUT_SECS", &secs)?);
        }
        if let Some(secs) = var("CONNECT_TIMEOUT_SECS") {
            builder = builder.connect_timeout(parse_secs("CONNECT_TIMEOUT_SECS", &secs)?);
        }
        if let Some(agent) = var("USER_AGENT") {
            builder = builder.user_agent(agent);
        }
        if let Some(flag) = var("WIRETAP") {
            builder = builder.wiretap_enabled(parse_flag("WIRETAP", &flag)?);
        }

        Ok(builder.build())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| HttpClientError::Config(format!("{}={:?}: {}", key, value, e)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(HttpClientError::Config(format!(
            "{}={:?}: expected one of 1/0, true/false, yes/no, on/off",
            key, value
        ))),
    }
}

/// Builder for HTTP client configuration.
#[derive(Debug, Default, Clone)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL for all requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Add a default header for all requests.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((name.into(), value.into()));
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable gzip compression.
    pub fn gzip(mut self, enable: bool) -> Self {
        self.config.gzip = enable;
        self
    }

    /// Enable or disable brotli compression.
    pub fn brotli(mut self, enable: bool) -> Self {
        self.config.brotli = enable;
        self
    }

    /// Enable or disable following redirects.
    pub fn follow_redirects(mut self, enable: bool) -> Self {
        self.config.follow_redirects = enable;
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Enable or disable status classification.
    pub fn classify_responses(mut self, enable: bool) -> Self {
        self.config.classify_responses = enable;
        self
    }

    /// Set the wiretap configuration.
    pub fn wiretap(mut self, wiretap: WiretapConfig) -> Self {
        self.config.wiretap = wiretap;
        self
    }

    /// Switch the wiretap on or off, keeping its other settings.
    pub fn wiretap_enabled(mut self, enable: bool) -> Self {
        self.config.wiretap.enabled = enable;
        self
    }

    /// Register an interceptor after those already registered.
    pub fn interceptor<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.config.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Apply a customization function to this builder.
    pub fn apply<F>(self, customize: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        customize(self)
    }

    /// Build the configuration.
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_do_not_follow_redirects() {
        let config = HttpClientConfig::default();
        assert!(!config.follow_redirects);
        assert!(!config.classify_responses);
        assert!(!config.wiretap.enabled);
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("tether-http-client/"));
    }

    #[test]
    fn test_builder_round_trip() {
        let config = HttpClientConfig::builder()
            .base_url("http://orders.local")
            .timeout(Duration::from_secs(5))
            .default_header("x-tenant", "acme")
            .wiretap_enabled(true)
            .build();

        let rebuilt = config.clone().into_builder().gzip(false).build();
        assert_eq!(rebuilt.base_url.as_deref(), Some("http://orders.local"));
        assert_eq!(rebuilt.timeout, Some(Duration::from_secs(5)));
        assert_eq!(rebuilt.default_headers.len(), 1);
        assert!(rebuilt.wiretap.enabled);
        assert!(!rebuilt.gzip);
        assert!(config.gzip);
    }

    #[test]
    fn test_from_lookup_reads_prefixed_keys() {
        let config = HttpClientConfig::from_lookup(
            "ORDERS",
            lookup(&[
                ("ORDERS_BASE_URL", "http://orders.local"),
                ("ORDERS_TIMEOUT_SECS", "12"),
                ("ORDERS_WIRETAP", "yes"),
                ("OTHER_USER_AGENT", "ignored"),
            ]),
        )
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("http://orders.local"));
        assert_eq!(config.timeout, Some(Duration::from_secs(12)));
        assert!(config.wiretap.enabled);
        assert!(config.user_agent.starts_with("tether-http-client/"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let result = HttpClientConfig::from_lookup(
            "ORDERS",
            lookup(&[("ORDERS_CONNECT_TIMEOUT_SECS", "soon")]),
        );
        assert!(matches!(result, Err(HttpClientError::Config(_))));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("WIRETAP", "TRUE").unwrap());
        assert!(parse_flag("WIRETAP", " on ").unwrap());
        assert!(!parse_flag("WIRETAP", "0").unwrap());
        assert!(!parse_flag("WIRETAP", "Off").unwrap());
        assert!(parse_flag("WIRETAP", "nope").is_err());
    }

    #[test]
    fn test_from_lookup_rejects_unknown_flags() {
        let result =
            HttpClientConfig::from_lookup("ORDERS", lookup(&[("ORDERS_WIRETAP", "maybe")]));
        match result {
            Err(HttpClientError::Config(msg)) => assert!(msg.contains("WIRETAP")),
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }
}
