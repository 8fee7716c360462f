//! Factory for service-to-service clients.
//!
//! Every client handed out by [`ClientFactory`] is built the same way:
//!
//! 1. clone the factory's base configuration,
//! 2. set the base URL,
//! 3. disable redirect following,
//! 4. enable status classification,
//! 5. switch the wiretap on or off as asked,
//! 6. run the caller's customization, if any,
//! 7. build the immutable client.
//!
//! The factory owns the builder until step 6, so a customization always
//! runs after the defaults and may override any of them.

use crate::{BlockingHttpClient, HttpClient, HttpClientConfig, HttpClientConfigBuilder, Result};

type NoCustomization = fn(HttpClientConfigBuilder) -> HttpClientConfigBuilder;

/// Creates [`HttpClient`]s and [`BlockingHttpClient`]s for calls between
/// services.
#[derive(Debug, Clone, Default)]
pub struct ClientFactory {
    base: HttpClientConfig,
}

impl ClientFactory {
    /// Create a factory on top of a shared base configuration, typically
    /// supplied by the hosting application.
    pub fn new(base: HttpClientConfig) -> Self {
        Self { base }
    }

    /// The base configuration every client starts from.
    pub fn base_config(&self) -> &HttpClientConfig {
        &self.base
    }

    /// Get an async client for `base_url`.
    pub fn new_client(&self, base_url: &str, wiretap: bool) -> Result<HttpClient> {
        HttpClient::new(self.prepare(base_url, None::<NoCustomization>, wiretap))
    }

    /// Get an async client for `base_url`, customized by `customize`.
    pub fn new_client_with<F>(
        &self,
        base_url: &str,
        customize: F,
        wiretap: bool,
    ) -> Result<HttpClient>
    where
        F: FnOnce(HttpClientConfigBuilder) -> HttpClientConfigBuilder,
    {
        HttpClient::new(self.prepare(base_url, Some(customize), wiretap))
    }

    /// Get a blocking client for `base_url`.
    pub fn new_blocking_client(&self, base_url: &str, wiretap: bool) -> Result<BlockingHttpClient> {
        BlockingHttpClient::new(self.prepare(base_url, None::<NoCustomization>, wiretap))
    }

    /// Get a blocking client for `base_url`, customized by `customize`.
    pub fn new_blocking_client_with<F>(
        &self,
        base_url: &str,
        customize: F,
        wiretap: bool,
    ) -> Result<BlockingHttpClient>
    where
        F: FnOnce(HttpClientConfigBuilder) -> HttpClientConfigBuilder,
    {
        BlockingHttpClient::new(self.prepare(base_url, Some(customize), wiretap))
    }

    fn prepare<F>(&self, base_url: &str, customize: Option<F>, wiretap: bool) -> HttpClientConfig
    where
        F: FnOnce(HttpClientConfigBuilder) -> HttpClientConfigBuilder,
    {
        let mut builder = self
            .base
            .clone()
            .into_builder()
            .base_url(base_url)
            .follow_redirects(false)
            .classify_responses(true)
            .wiretap_enabled(wiretap);

        if let Some(customize) = customize {
            builder = builder.apply(customize);
        }

        builder.build()
    }
}
