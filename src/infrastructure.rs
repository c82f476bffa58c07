// Infrastructure layer modules
pub mod config;
pub mod log_sink;
pub mod logging;

// Re-exports
pub use config::{LogFormat, LoggingConfig, LoggingConfigError};
pub use log_sink::{LogSink, TracingLogSink};
pub use logging::{init_logging, init_logging_with};
