//! # Tether HTTP Client
//!
//! HTTP clients for calls between services. Every client created through
//! [`ClientFactory`] has a base URL, never follows redirects, and turns
//! non-2xx responses into one of nine typed [`ErrorKind`]s. An optional
//! wiretap traces requests and responses through `tracing`.
//!
//! ## Features
//!
//! - **Typed status errors**: 4xx/5xx/302 responses become [`ErrorKind`]s
//! - **Async and blocking**: [`HttpClient`] and [`BlockingHttpClient`] share
//!   configuration, interceptors and classification
//! - **Wiretap**: request/response tracing under the `tether::wiretap` target
//! - **Customization**: caller hooks run after every factory default
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tether_http_client::{ClientFactory, ErrorKind, HttpClientError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let factory = ClientFactory::default();
//!     let client = factory.new_client("http://orders.internal", false)?;
//!
//!     match client.get("/orders/42").send().await {
//!         Ok(response) => println!("{}", response.text()?),
//!         Err(HttpClientError::Status(ErrorKind::NotFound(_))) => println!("no such order"),
//!         Err(HttpClientError::Status(ErrorKind::Found { location })) => {
//!             println!("moved to {}", location)
//!         }
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Customization and Wiretap
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tether_http_client::ClientFactory;
//!
//! # fn main() -> Result<(), tether_http_client::HttpClientError> {
//! let factory = ClientFactory::default();
//!
//! // Blocking client with the wiretap on and a caller-supplied timeout.
//! let client = factory.new_blocking_client_with(
//!     "http://billing.internal",
//!     |builder| builder.timeout(Duration::from_secs(5)),
//!     true,
//! )?;
//!
//! let invoice = client.get("/invoices/7").send()?;
//! println!("{}", invoice.status());
//! # Ok(())
//! # }
//! ```

mod blocking;
mod classify;
mod client;
mod config;
mod error;
mod factory;
mod interceptor;
mod request;
mod response;
mod wiretap;

pub use blocking::BlockingHttpClient;
pub use classify::{StatusClassifier, classify};
pub use client::HttpClient;
pub use config::{HttpClientConfig, HttpClientConfigBuilder};
pub use error::{ErrorKind, HttpClientError, Result};
pub use factory::ClientFactory;
pub use interceptor::{HeaderInterceptor, Interceptor};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use wiretap::{WIRETAP_TARGET, WiretapConfig, WiretapInterceptor};

// Re-export common types
pub use bytes::Bytes;
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use tether_http_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::blocking::BlockingHttpClient;
    pub use crate::client::HttpClient;
    pub use crate::config::{HttpClientConfig, HttpClientConfigBuilder};
    pub use crate::error::{ErrorKind, HttpClientError, Result};
    pub use crate::factory::ClientFactory;
    pub use crate::interceptor::Interceptor;
    pub use crate::response::Response;
    pub use crate::wiretap::WiretapConfig;
    pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
}
