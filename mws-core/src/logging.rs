//! Structured logging system.
//!
//! Library code only emits `tracing` events; installing a subscriber is up
//! to the application. [`init_logging`] installs a ready-made one:
//! - Level presets for development, production and tests
//! - `RUST_LOG` overrides the configured level
//! - Pretty, compact or JSON output

use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level: most detailed debugging information.
    Trace,
    /// Debug level: request and parsing details.
    Debug,
    /// Info level: dispatched requests.
    Info,
    /// Warn level: failed exchanges and fallbacks.
    Warn,
    /// Error level: transport failures.
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable formatted output.
    Pretty,
    /// Compact format.
    Compact,
    /// JSON format for production environments.
    Json,
}

/// Log configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level.
    pub level: LogLevel,
    /// Log format.
    pub format: LogFormat,
    /// Whether to show timestamps.
    pub show_time: bool,
    /// Whether to show thread IDs.
    pub show_thread_ids: bool,
    /// Whether to show target module.
    pub show_target: bool,
    /// Whether to show span events (function enter/exit).
    pub show_span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            show_time: true,
            show_thread_ids: false,
            show_target: true,
            show_span_events: false,
        }
    }
}

impl LogConfig {
    /// Creates a log configuration for development environments.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            show_time: true,
            show_thread_ids: false,
            show_target: true,
            show_span_events: true,
        }
    }

    /// Creates a log configuration for production environments.
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            show_time: true,
            show_thread_ids: true,
            show_target: true,
            show_span_events: false,
        }
    }

    /// Creates a log configuration for test environments.
    pub fn test() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            show_time: false,
            show_thread_ids: false,
            show_target: false,
            show_span_events: false,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "mws_core={level},mws_apis={level},mws_rust={level}",
                level = self.level
            ))
        })
    }

    fn span_events(&self) -> FmtSpan {
        if self.show_span_events {
            FmtSpan::ENTER | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let base = fmt::layer()
            .with_thread_ids(self.show_thread_ids)
            .with_target(self.show_target)
            .with_span_events(self.span_events());

        match (self.format, self.show_time) {
            (LogFormat::Pretty, true) => base.pretty().boxed(),
            (LogFormat::Pretty, false) => base.pretty().without_time().boxed(),
            (LogFormat::Compact, true) => base.compact().boxed(),
            (LogFormat::Compact, false) => base.compact().without_time().boxed(),
            (LogFormat::Json, true) => base.json().boxed(),
            (LogFormat::Json, false) => base.json().without_time().boxed(),
        }
    }
}

/// Initializes the logging system.
///
/// # Panics
///
/// Panics if a global subscriber is already installed. Use
/// [`try_init_logging`] where that can happen.
///
/// # Examples
///
/// ```no_run
/// use mws_core::logging::{init_logging, LogConfig};
///
/// init_logging(&LogConfig::development());
/// ```
pub fn init_logging(config: &LogConfig) {
    tracing_subscriber::registry()
        .with(config.layer().with_filter(config.env_filter()))
        .init();
}

/// Attempts to initialize the logging system.
///
/// Returns an error instead of panicking when a subscriber is already
/// installed, so tests can call it repeatedly.
pub fn try_init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(config.layer().with_filter(config.env_filter()))
        .try_init()
}
