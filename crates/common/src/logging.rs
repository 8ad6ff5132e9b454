//! Logging and tracing initialization.

use crate::config::LoggingConfig;
use std::fs::File;
use std::sync::Arc;

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set. When
/// `config.file` names a path the log goes there instead of stdout; an
/// unopenable path falls back to stdout.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::fmt::writer::BoxMakeWriter;
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let writer = match &config.file {
        Some(path) => match File::create(path) {
            Ok(file) => BoxMakeWriter::new(Arc::new(file)),
            Err(e) => {
                eprintln!("cannot open log file {:?}: {}", path, e);
                BoxMakeWriter::new(std::io::stdout)
            }
        },
        None => BoxMakeWriter::new(std::io::stdout),
    };

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}
