//! Logging setup for the CLI.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Directive used when `RUST_LOG` is unset or invalid.
pub(crate) const DEFAULT_DIRECTIVE: &str = "warn";

/// Configuration for the logger.
#[derive(Debug, Clone)]
pub(crate) struct LoggerConfig {
    /// Filter used when `RUST_LOG` is absent.
    default_directive: String,

    /// Whether to include source file and line in events.
    with_location: bool,
}

impl LoggerConfig {
    pub(crate) fn new(default_directive: impl Into<String>) -> Self {
        Self {
            default_directive: default_directive.into(),
            with_location: false,
        }
    }

    pub(crate) fn with_location(mut self, enabled: bool) -> Self {
        self.with_location = enabled;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_directive))
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTIVE)
    }
}

/// Initializes the logging subsystem. Events go to stderr; stdout carries
/// command output only.
pub(crate) fn init(config: LoggerConfig) {
    let stderr_sub = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_file(config.with_location)
        .with_line_number(config.with_location)
        .with_filter(config.filter());

    tracing_subscriber::registry().with(stderr_sub).init();
}
