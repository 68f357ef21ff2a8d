//! Logging and tracing initialization.

use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level`. When `config.file` is
/// set, output is appended to that file instead of stderr.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = build_subscriber(config, env_filter);
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn build_subscriber(
    config: &LoggingConfig,
    env_filter: EnvFilter,
) -> Box<dyn Subscriber + Send + Sync> {
    let log_file = config.file.as_ref().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("Failed to open log file {}: {e}", path.display()))
            .ok()
    });

    let builder = fmt::Subscriber::builder().with_env_filter(env_filter);

    match (config.json, log_file) {
        (true, Some(file)) => Box::new(builder.json().with_writer(Mutex::new(file)).finish()),
        (true, None) => Box::new(builder.json().with_writer(std::io::stderr).finish()),
        (false, Some(file)) => Box::new(
            builder
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish(),
        ),
        (false, None) => Box::new(
            builder
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .finish(),
        ),
    }
}
