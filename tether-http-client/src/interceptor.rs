//! Request and response interceptors.

use std::sync::Arc;

use crate::classify::StatusClassifier;
use crate::wiretap::WiretapInterceptor;
use crate::{HttpClientConfig, Request, Response, Result};

/// Interceptor trait for inspecting or modifying requests and responses.
///
/// Hooks are synchronous so the same chain serves the async and the
/// blocking client. Returning an error aborts the exchange.
pub trait Interceptor: Send + Sync {
    /// Intercept and optionally modify the request before sending.
    fn intercept_request(&self, request: Request) -> Result<Request> {
        Ok(request)
    }

    /// Intercept and optionally modify the response after receiving.
    fn intercept_response(&self, response: Response) -> Result<Response> {
        Ok(response)
    }
}

/// Ordered interceptor chain.
///
/// Requests pass the interceptors in registration order, responses in
/// reverse order, so the first interceptor registered sees the response
/// last.
#[derive(Clone, Default)]
pub(crate) struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub(crate) fn new(interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        Self { interceptors }
    }

    /// Build the chain a client runs: the status classifier outermost, then
    /// the configured interceptors, then the wiretap closest to the wire.
    pub(crate) fn for_config(config: &HttpClientConfig) -> Self {
        let mut interceptors: Vec<Arc<dyn Interceptor>> = Vec::new();
        if config.classify_responses {
            interceptors.push(Arc::new(StatusClassifier));
        }
        interceptors.extend(config.interceptors.iter().cloned());
        if config.wiretap.enabled {
            interceptors.push(Arc::new(WiretapInterceptor::new(config.wiretap)));
        }
        Self::new(interceptors)
    }

    pub(crate) fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub(crate) fn on_request(&self, request: Request) -> Result<Request> {
        self.interceptors
            .iter()
            .try_fold(request, |req, i| i.intercept_request(req))
    }

    pub(crate) fn on_response(&self, response: Response) -> Result<Response> {
        self.interceptors
            .iter()
            .rev()
            .try_fold(response, |resp, i| i.intercept_response(resp))
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.interceptors.len())
            .finish()
    }
}

/// Interceptor that adds a fixed header to every request.
pub struct HeaderInterceptor {
    name: http::HeaderName,
    value: http::HeaderValue,
}

impl HeaderInterceptor {
    /// Create a header interceptor, validating name and value.
    pub fn new(name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = http::HeaderName::from_bytes(name.as_ref().as_bytes())
            .map_err(|e| crate::HttpClientError::Interceptor(e.to_string()))?;
        let value = http::HeaderValue::from_str(value.as_ref())
            .map_err(|e| crate::HttpClientError::Interceptor(e.to_string()))?;
        Ok(Self { name, value })
    }

    /// Create a bearer token interceptor.
    pub fn bearer(token: impl AsRef<str>) -> Result<Self> {
        Self::new("authorization", format!("Bearer {}", token.as_ref()))
    }
}

impl Interceptor for HeaderInterceptor {
    fn intercept_request(&self, mut request: Request) -> Result<Request> {
        request
            .headers_mut()
            .insert(self.name.clone(), self.value.clone());
        Ok(request)
    }
}
