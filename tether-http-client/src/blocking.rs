//! Blocking HTTP client.
//!
//! Same configuration, interceptors and error classification as
//! [`HttpClient`](crate::HttpClient), but every call occupies the calling
//! thread until the exchange completes.
//!
//! Like `reqwest::blocking`, this client must not be created or dropped
//! from within an async runtime.

use http::Method;
use std::sync::Arc;
use tracing::debug;

use crate::client::configure_transport;
use crate::interceptor::InterceptorChain;
use crate::{HttpClientConfig, Request, RequestBuilder, Response, Result};

/// Blocking HTTP client.
#[derive(Debug, Clone)]
pub struct BlockingHttpClient {
    inner: reqwest::blocking::Client,
    config: Arc<HttpClientConfig>,
    chain: Arc<InterceptorChain>,
}

impl BlockingHttpClient {
    /// Create a new blocking client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let inner =
            configure_transport!(reqwest::blocking::Client::builder(), &config).build()?;
        let chain = InterceptorChain::for_config(&config);

        debug!(
            base_url = config.base_url.as_deref().unwrap_or_default(),
            interceptors = chain.len(),
            wiretap = config.wiretap.enabled,
            "Built blocking HTTP client"
        );

        Ok(Self {
            inner,
            config: Arc::new(config),
            chain: Arc::new(chain),
        })
    }

    /// Get the underlying reqwest client.
    pub fn inner(&self) -> &reqwest::blocking::Client {
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

    pub(crate) fn execute(&self, request: Request) -> Result<Response> {
        let request = self.chain.on_request(request)?;
        let response = self.inner.execute(request.into_blocking(&self.inner)?)?;
        let response = Response::from_blocking(response)?;
        self.chain.on_response(response)
    }
}
