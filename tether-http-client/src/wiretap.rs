//! Wiretap: verbose tracing of outgoing requests and incoming responses.
//!
//! Events are emitted under the [`WIRETAP_TARGET`] target at the level set in
//! [`WiretapConfig`]. Nothing global is touched when the wiretap is enabled;
//! the subscriber's filter decides what is written out.

use tracing::Level;

use crate::classify::reason;
use crate::interceptor::Interceptor;
use crate::{Request, Response, Result};

/// Tracing target of every wiretap event.
pub const WIRETAP_TARGET: &str = "tether::wiretap";

macro_rules! wiretap_event {
    ($level:expr, $($arg:tt)+) => {{
        let level = $level;
        if level == Level::ERROR {
            tracing::error!(target: WIRETAP_TARGET, $($arg)+);
        } else if level == Level::WARN {
            tracing::warn!(target: WIRETAP_TARGET, $($arg)+);
        } else if level == Level::INFO {
            tracing::info!(target: WIRETAP_TARGET, $($arg)+);
        } else if level == Level::DEBUG {
            tracing::debug!(target: WIRETAP_TARGET, $($arg)+);
        } else {
            tracing::trace!(target: WIRETAP_TARGET, $($arg)+);
        }
    }};
}

/// Wiretap configuration carried by each client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiretapConfig {
    /// Emit wiretap events at all.
    pub enabled: bool,
    /// Level of the emitted events.
    pub level: Level,
    /// Also emit one event per request and response header.
    pub log_headers: bool,
    /// Emit the request body when it is not empty.
    pub log_body: bool,
}

impl Default for WiretapConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: Level::TRACE,
            log_headers: false,
            log_body: true,
        }
    }
}

impl WiretapConfig {
    /// Enabled wiretap at `TRACE` level.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Set the event level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable logging of headers.
    pub fn with_headers(mut self) -> Self {
        self.log_headers = true;
        self
    }

    /// Disable logging of request bodies.
    pub fn without_body(mut self) -> Self {
        self.log_body = false;
        self
    }
}

/// Interceptor writing the wiretap events.
#[derive(Debug, Clone)]
pub struct WiretapInterceptor {
    config: WiretapConfig,
}

impl WiretapInterceptor {
    /// Create a wiretap interceptor.
    pub fn new(config: WiretapConfig) -> Self {
        Self { config }
    }
}

impl Interceptor for WiretapInterceptor {
    fn intercept_request(&self, request: Request) -> Result<Request> {
        let level = self.config.level;
        wiretap_event!(level, "Request: {} {}", request.method(), request.url());

        if self.config.log_headers {
            for (name, value) in request.headers() {
                wiretap_event!(level, header = %name, value = ?value, "Request header");
            }
        }

        if self.config.log_body
            && let Some(body) = request.body().filter(|b| !b.is_empty())
        {
            wiretap_event!(level, "Request body: {}", String::from_utf8_lossy(body));
        }

        Ok(request)
    }

    fn intercept_response(&self, response: Response) -> Result<Response> {
        let level = self.config.level;
        let status = response.status();
        wiretap_event!(level, "Response: {} {}", status.as_u16(), reason(status));

        if self.config.log_headers {
            for (name, value) in response.headers() {
                wiretap_event!(level, header = %name, value = ?value, "Response header");
            }
        }

        Ok(response)
    }
}
