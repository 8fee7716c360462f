//! Logging setup for services using tether clients.
//!
//! Installs a global `tracing` subscriber. The wiretap of a client only
//! emits events; whether they are written is decided here, by the filter.
//!
//! # Examples
//!
//! ```no_run
//! use tether::logging::*;
//!
//! let _guard = LogConfig::new()
//!     .level(LogLevel::Info)
//!     .format(LogFormat::Compact)
//!     .with_wiretap(true)
//!     .init()
//!     .expect("logging already initialised");
//! ```

use std::io;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tether_http_client::WIRETAP_TARGET;

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, trace, warn};

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Most verbose - shows all logs
    Trace,
    /// Debug information for development
    Debug,
    /// General information about application flow
    Info,
    /// Warning messages for potential issues
    Warn,
    /// Error messages for failures
    Error,
}

impl LogLevel {
    /// Convert to string for EnvFilter
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format - structured, machine-readable
    Json,
    /// Pretty format - multi-line, for development
    Pretty,
    /// Compact format - one line per event
    Compact,
}

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LogInitError {
    /// The filter directives could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber is already installed.
    #[error("failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include target (module path)
    pub targets: bool,
    /// Enable ANSI colors
    pub colors: bool,
    /// Custom filter directives (overrides `RUST_LOG` and `level`)
    pub env_filter: Option<String>,
    /// Always show wiretap events, whatever the base level
    pub wiretap: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            targets: true,
            colors: false,
            env_filter: None,
            wiretap: false,
        }
    }
}

impl LogConfig {
    /// Create a new logging configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set log level
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set output format
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable target (module path)
    pub fn with_targets(mut self, enable: bool) -> Self {
        self.targets = enable;
        self
    }

    /// Enable or disable ANSI colors
    pub fn with_colors(mut self, enable: bool) -> Self {
        self.colors = enable;
        self
    }

    /// Set custom filter directives, e.g. `"tether_http_client=debug,hyper=info"`
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Let wiretap events through at `TRACE`, regardless of the base level.
    pub fn with_wiretap(mut self, enable: bool) -> Self {
        self.wiretap = enable;
        self
    }

    /// Filter directives this configuration installs.
    pub fn directives(&self) -> String {
        self.directives_from(std::env::var("RUST_LOG").ok())
    }

    fn directives_from(&self, rust_log: Option<String>) -> String {
        let mut directives = self
            .env_filter
            .clone()
            .or(rust_log.filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| self.level.as_str().to_string());

        if self.wiretap {
            directives.push_str(&format!(",{}=trace", WIRETAP_TARGET));
        }
        directives
    }

    /// Install the global subscriber.
    ///
    /// Returns a guard that must be kept alive for the duration of the
    /// program; dropping it flushes buffered output.
    pub fn init(self) -> Result<WorkerGuard, LogInitError> {
        let filter = EnvFilter::try_new(self.directives())?;
        let (writer, guard) = tracing_appender::non_blocking(io::stdout());
        let registry = tracing_subscriber::registry().with(filter);

        match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_target(self.targets),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(writer)
                        .with_ansi(self.colors)
                        .with_target(self.targets),
                )
                .try_init()?,
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_ansi(self.colors)
                        .with_target(self.targets),
                )
                .try_init()?,
        }

        Ok(guard)
    }
}
