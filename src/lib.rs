// Tether - typed HTTP clients for service-to-service calls
//
// Re-exports the client crate and adds process-wide logging setup.

// Re-export the client crate
pub use tether_http_client as http_client;
pub use tether_http_client::{
    BlockingHttpClient, ClientFactory, ErrorKind, HttpClient, HttpClientConfig,
    HttpClientConfigBuilder, HttpClientError, Interceptor, Response, WIRETAP_TARGET,
    WiretapConfig,
};

pub mod logging;

// Prelude for common imports
pub mod prelude {
    pub use crate::logging::{LogConfig, LogFormat, LogLevel};
    pub use tether_http_client::prelude::*;
}
