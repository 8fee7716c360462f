//! HTTP response wrapper.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use crate::{HttpClientError, Result};

/// HTTP response with a fully read body.
///
/// Both the async and the blocking client produce this type, so
/// interceptors see the same shape regardless of the transport.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    url: url::Url,
}

impl Response {
    /// Assemble a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, url: url::Url) -> Self {
        Self {
            status,
            headers,
            body,
            url,
        }
    }

    /// Create a response from a reqwest response, reading the body.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.bytes().await?;

        Ok(Self::new(status, headers, body, url))
    }

    /// Create a response from a blocking reqwest response, reading the body.
    pub(crate) fn from_blocking(response: reqwest::blocking::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.bytes()?;

        Ok(Self::new(status, headers, body, url))
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the response was successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a specific header value.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    /// Get the response URL.
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Get the response body as bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response and return the body as bytes.
    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String> {
        Ok(String::from_utf8(self.body.to_vec())?)
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| HttpClientError::Json(e.to_string()))
    }

    /// Get the content type if available.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn response(body: &'static [u8]) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        Response::new(
            StatusCode::OK,
            headers,
            Bytes::from_static(body),
            url::Url::parse("http://localhost/items").unwrap(),
        )
    }

    #[test]
    fn test_text_and_json() {
        let resp = response(br#"{"id":7}"#);
        assert!(resp.is_success());
        assert_eq!(resp.text().unwrap(), r#"{"id":7}"#);

        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(resp.content_type(), Some("application/json"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let resp = response(b"not json");
        let result: Result<serde_json::Value> = resp.json();
        assert!(matches!(result, Err(HttpClientError::Json(_))));
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let resp = response(b"caf\xe9");
        let err = resp.text().unwrap_err();
        assert!(matches!(err, HttpClientError::Decode(_)));
        assert!(err.to_string().starts_with("Failed to decode response body"));
    }
}
