//! Async HTTP client implementation.

use http::Method;
use std::sync::Arc;
use tracing::debug;

use crate::interceptor::InterceptorChain;
use crate::{HttpClientConfig, Request, RequestBuilder, Response, Result};

/// Apply the transport-level settings of a config to a reqwest builder.
///
/// Works for both `reqwest::ClientBuilder` and
/// `reqwest::blocking::ClientBuilder`, which share these method names.
macro_rules! configure_transport {
    ($builder:expr, $config:expr) => {{
        let config: &HttpClientConfig = $config;
        let mut builder = $builder
            .user_agent(config.user_agent.as_str())
            .gzip(config.gzip)
            .brotli(config.brotli);

        builder = if config.follow_redirects {
            builder.redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        } else {
            builder.redirect(reqwest::redirect::Policy::none())
        };
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder
    }};
}

pub(crate) use configure_transport;

/// Non-blocking HTTP client.
///
/// `send().await` suspends the calling task until the response body has
/// been read; the interceptor chain then runs as the continuation.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: Arc<HttpClientConfig>,
    chain: Arc<InterceptorChain>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let inner = configure_transport!(reqwest::Client::builder(), &config).build()?;
        let chain = InterceptorChain::for_config(&config);

        debug!(
            base_url = config.base_url.as_deref().unwrap_or_default(),
            interceptors = chain.len(),
            wiretap = config.wiretap.enabled,
            "Built HTTP client"
        );

        Ok(Self {
            inner,
            config: Arc::new(config),
            chain: Arc::new(chain),
        })
    }

    /// Get the underlying reqwest client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Get the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder<'_, Self> {
        self.request(Method::GET, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder<'_, Self> {
        self.request(Method::POST, url)
    }

    /// Create a PUT request builder.
    pub fn put(&self, url: impl Into<String>) -> RequestBuilder<'_, Self> {
        self.request(Method::PUT, url)
    }

    /// Create a PATCH request builder.
    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder<'_, Self> {
        self.request(Method::PATCH, url)
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder<'_, Self> {
        self.request(Method::DELETE, url)
    }

    /// Create a HEAD request builder.
    pub fn head(&self, url: impl Into<String>) -> RequestBuilder<'_, Self> {
        self.request(Method::HEAD, url)
    }

    /// Create a request builder with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> RequestBuilder<'_, Self> {
        RequestBuilder::new(self, &self.config, method, url.into())
    }

    /// Run a request through the interceptor chain and the transport.
    pub(crate) async fn execute(&self, request: Request) -> Result<Response> {
        let request = self.chain.on_request(request)?;
        let response = self
            .inner
            .execute(request.into_reqwest(&self.inner)?)
            .await?;
        let response = Response::from_reqwest(response).await?;
        self.chain.on_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new(HttpClientConfig::default()).unwrap();
        assert!(client.config().gzip);
        assert!(!client.config().follow_redirects);
    }

    #[test]
    fn test_client_with_config() {
        let config = HttpClientConfig::builder()
            .timeout(Duration::from_secs(60))
            .base_url("https://api.example.com")
            .build();

        let client = HttpClient::new(config).unwrap();
        assert_eq!(client.config().timeout, Some(Duration::from_secs(60)));
        assert_eq!(
            client.config().base_url.as_deref(),
            Some("https://api.example.com")
        );
    }

    #[test]
    fn test_invalid_user_agent_is_an_error() {
        let config = HttpClientConfig::builder().user_agent("bad\nagent").build();
        assert!(HttpClient::new(config).is_err());
    }
}
