//! Requests and the request builder.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::time::Duration;

use crate::{BlockingHttpClient, HttpClient, HttpClientConfig, HttpClientError, Response, Result};

/// Outgoing request, as seen by interceptors.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: url::Url,
    headers: HeaderMap,
    body: Option<Bytes>,
    timeout: Option<Duration>,
}

impl Request {
    /// Create a request without headers or body.
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the fully resolved URL.
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the headers mutably.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Get the body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Get the per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn into_reqwest(self, client: &reqwest::Client) -> Result<reqwest::Request> {
        let mut builder = client.request(self.method, self.url).headers(self.headers);
        if let Some(body) = self.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    pub(crate) fn into_blocking(
        self,
        client: &reqwest::blocking::Client,
    ) -> Result<reqwest::blocking::Request> {
        let mut builder = client.request(self.method, self.url).headers(self.headers);
        if let Some(body) = self.body {
            builder = builder.body(body.to_vec());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

/// HTTP request builder.
///
/// Shared by both clients; `send` is async on [`HttpClient`] and blocking
/// on [`BlockingHttpClient`].
pub struct RequestBuilder<'a, C> {
    client: &'a C,
    config: &'a HttpClientConfig,
    method: Method,
    url: String,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<Bytes>,
    timeout: Option<Duration>,
    error: Option<HttpClientError>,
}

impl<'a, C> RequestBuilder<'a, C> {
    pub(crate) fn new(
        client: &'a C,
        config: &'a HttpClientConfig,
        method: Method,
        url: String,
    ) -> Self {
        Self {
            client,
            config,
            method,
            url,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            timeout: None,
            error: None,
        }
    }

    /// Add a header to the request. Invalid names or values fail the send.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        match (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                self.fail(HttpClientError::RequestBuild(format!(
                    "invalid header: {}",
                    name.as_ref()
                )));
            }
        }
        self
    }

    /// Add multiple headers to the request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.body = Some(Bytes::from(text.into()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, json: &T) -> Self {
        match serde_json::to_vec(json) {
            Ok(bytes) => {
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                self.body = Some(Bytes::from(bytes));
            }
            Err(e) => self.fail(HttpClientError::Json(e.to_string())),
        }
        self
    }

    /// Set the request body as form data.
    pub fn form<T: Serialize>(mut self, form: &T) -> Self {
        match serde_urlencoded::to_string(form) {
            Ok(encoded) => {
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
                self.body = Some(Bytes::from(encoded));
            }
            Err(e) => self.fail(HttpClientError::RequestBuild(e.to_string())),
        }
        self
    }

    /// Set a custom timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set bearer authentication.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("authorization", format!("Bearer {}", token.as_ref()))
    }

    fn fail(&mut self, error: HttpClientError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Resolve the URL against the base URL and add query parameters.
    ///
    /// Absolute URLs are used as-is. Relative paths are appended to the
    /// base URL, keeping any path the base already has.
    fn build_url(&self) -> Result<url::Url> {
        let mut url = match (&self.config.base_url, url::Url::parse(&self.url)) {
            (_, Ok(absolute)) => absolute,
            (Some(base), Err(_)) => {
                let joined = format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    self.url.trim_start_matches('/')
                );
                url::Url::parse(&joined).map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?
            }
            (None, Err(e)) => return Err(HttpClientError::InvalidUrl(e.to_string())),
        };

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Turn the builder into a [`Request`], applying default headers first.
    pub(crate) fn into_request(mut self) -> Result<(&'a C, Request)> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }

        let url = self.build_url()?;
        let mut headers = HeaderMap::new();
        for (name, value) in &self.config.default_headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| HttpClientError::RequestBuild(e.to_string()))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| HttpClientError::RequestBuild(e.to_string()))?;
            headers.insert(name, value);
        }
        headers.extend(self.headers);

        let request = Request {
            method: self.method,
            url,
            headers,
            body: self.body,
            timeout: self.timeout,
        };
        Ok((self.client, request))
    }
}

impl RequestBuilder<'_, HttpClient> {
    /// Send the request.
    pub async fn send(self) -> Result<Response> {
        let (client, request) = self.into_request()?;
        client.execute(request).await
    }
}

impl RequestBuilder<'_, BlockingHttpClient> {
    /// Send the request, blocking the current thread.
    pub fn send(self) -> Result<Response> {
        let (client, request) = self.into_request()?;
        client.execute(request)
    }
}
