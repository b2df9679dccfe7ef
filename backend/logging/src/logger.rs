//! Structured Logger
//!
//! Wraps `tracing` to provide human or JSON console output, an optional
//! daily-rolling NDJSON file, and environment-based level control.

use phyassist_config::LoggingConfig;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global structured logger.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// When `config.dir` is set, NDJSON is also written to `<dir>/<file_name>.YYYY-MM-DD`.
pub fn init_logger(config: &LoggingConfig, file_name: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = config.dir.as_ref().map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, file_name);
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let (json_console, text_console) = if config.json {
        (
            Some(fmt::layer().json().with_writer(std::io::stderr)),
            None,
        )
    } else {
        (
            None,
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_ansi(true),
            ),
        )
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_console)
        .with(text_console)
        .with(file_layer)
        .try_init();
}
