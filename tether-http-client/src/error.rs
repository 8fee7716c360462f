//! HTTP client error types.

use http::StatusCode;
use thiserror::Error;

/// Result type for HTTP client operations.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// Classified failure returned by a remote service.
///
/// Every non-2xx response is turned into exactly one of these kinds before
/// the caller sees it. See [`classify`](crate::classify) for the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// 400, and any 4xx without a dedicated kind.
    #[error("{0}")]
    BadRequest(String),

    /// 401.
    #[error("{0}")]
    Unauthorized(String),

    /// 403.
    #[error("{0}")]
    Forbidden(String),

    /// 404.
    #[error("{0}")]
    NotFound(String),

    /// 302, carrying the `Location` header value (empty if absent).
    #[error("Found: {location}")]
    Found {
        /// Redirect target.
        location: String,
    },

    /// 409.
    #[error("{0}")]
    Conflict(String),

    /// 422.
    #[error("{0}")]
    UnprocessableEntity(String),

    /// 429.
    #[error("{0}")]
    TooManyRequests(String),

    /// 500, and every other status without a dedicated kind.
    #[error("{0}")]
    InternalServerError(String),
}

impl ErrorKind {
    /// Canonical HTTP status for this kind.
    ///
    /// Residual kinds report their canonical code (400 or 500), not the
    /// status that was originally received.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Found { .. } => StatusCode::FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message. For `Found` this is the redirect target.
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m)
            | Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Conflict(m)
            | Self::UnprocessableEntity(m)
            | Self::TooManyRequests(m)
            | Self::InternalServerError(m) => m,
            Self::Found { location } => location,
        }
    }

    /// Redirect target, only for `Found`.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Found { location } => Some(location),
            _ => None,
        }
    }

    /// Check if this kind stands for a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Check if this kind stands for a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The remote service answered with a non-2xx status.
    #[error(transparent)]
    Status(#[from] ErrorKind),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request building error.
    #[error("Failed to build request: {0}")]
    RequestBuild(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Response body is not valid UTF-8.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Interceptor error.
    #[error("Interceptor error: {0}")]
    Interceptor(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Underlying transport error (connect, DNS, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl HttpClientError {
    /// Get the classified kind if the remote returned a non-2xx status.
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            Self::Status(kind) => Some(kind),
            _ => None,
        }
    }

    /// Consume the error and return the classified kind, if any.
    pub fn into_kind(self) -> Option<ErrorKind> {
        match self {
            Self::Status(kind) => Some(kind),
            _ => None,
        }
    }

    /// Check if this is a classified status error.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Check if this is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect())
    }

    /// Get the HTTP status code if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(kind) => Some(kind.status().as_u16()),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
