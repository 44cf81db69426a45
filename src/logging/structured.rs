//! Subscriber setup for applications embedding the crate
//!
//! The library itself only emits `tracing` events. Applications that do not
//! install their own subscriber can call [`init_logging`] (or
//! [`init_from_config`]) once at startup.
//!
//! # Example
//!
//! ```no_run
//! use pii::config::PiiConfig;
//! use pii::logging::init_from_config;
//!
//! let config = PiiConfig::default();
//! let _guard = init_from_config(&config).expect("Failed to initialize logging");
//! ```

use crate::config::{LoggingConfig, PiiConfig};
use crate::domain::{PiiError, Result};
use std::path::Path;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// File name prefix of rolled log files
const LOG_FILE_PREFIX: &str = "pii.log";

/// Keeps the file writer alive; dropping it flushes buffered events
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Whether events are also written to a local file
    pub fn writes_to_file(&self) -> bool {
        self._file_guard.is_some()
    }
}

/// Install the global subscriber
///
/// Events go to the console and, if `config.local_enabled`, to JSON files
/// under `config.local_path`. `RUST_LOG` takes precedence over `level`.
///
/// # Errors
///
/// Returns [`PiiError::Configuration`] if the level or rotation is invalid,
/// the log directory cannot be created, or a global subscriber is already
/// installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pii={level}")));

    let mut layers = vec![tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_filter(filter.clone())
        .boxed()];

    let file_guard = if config.local_enabled {
        let rotation = parse_rotation(&config.local_rotation)?;
        let (layer, guard) = json_file_layer::<Registry>(Path::new(&config.local_path), rotation)?;
        layers.push(layer.with_filter(filter).boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| PiiError::Configuration(format!("Failed to install subscriber: {e}")))?;

    tracing::info!(
        level = %level,
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Install the global subscriber from a loaded configuration file
pub fn init_from_config(config: &PiiConfig) -> Result<LoggingGuard> {
    init_logging(&config.application.log_level, &config.logging)
}

/// JSON layer writing to rolled files in `dir`
fn json_file_layer<S>(
    dir: &Path,
    rotation: Rotation,
) -> Result<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard)>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    std::fs::create_dir_all(dir).map_err(|e| {
        PiiError::Configuration(format!(
            "Failed to create log directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let appender = RollingFileAppender::new(rotation, dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(writer)
        .boxed();

    Ok((layer, guard))
}

fn parse_log_level(level: &str) -> Result<Level> {
    level.parse::<Level>().map_err(|_| {
        PiiError::Configuration(format!(
            "Invalid log level: {level}. Must be one of: trace, debug, info, warn, error"
        ))
    })
}

fn parse_rotation(rotation: &str) -> Result<Rotation> {
    match rotation {
        "daily" => Ok(Rotation::DAILY),
        "hourly" => Ok(Rotation::HOURLY),
        "never" => Ok(Rotation::NEVER),
        other => Err(PiiError::Configuration(format!(
            "Invalid log rotation: {other}. Must be one of: daily, hourly, never"
        ))),
    }
}
