//! Logging setup on top of `tracing-subscriber`.
//!
//! - Console output with color control
//! - Optional file output in full, compact or JSON format
//! - Runtime level changes through [`LogLevelHandle`]

pub mod config;
pub mod error;
mod writer;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::io::IsTerminal;
use std::sync::Arc;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt,
    layer::{Layered, SubscriberExt},
    reload,
    util::SubscriberInitExt,
};
use writer::LogFileWriter;

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync + 'static>;

/// Handle for changing the active log filter after initialization
#[derive(Clone)]
pub struct LogLevelHandle {
    pub(crate) inner: Arc<reload::Handle<EnvFilter, Registry>>,
}

impl LogLevelHandle {
    /// Replace the active filter with `level` (any `EnvFilter` directive)
    pub fn set_level(&self, level: &str) -> Result<(), LoggerError> {
        let filter = EnvFilter::try_new(level)
            .map_err(|e| LoggerError::config(format!("Invalid log filter '{}': {}", level, e)))?;
        self.inner
            .reload(filter)
            .map_err(|e| LoggerError::reload(e.to_string()))
    }

    /// Current filter directives, `None` once the subscriber is gone
    pub fn current_level(&self) -> Option<String> {
        self.inner.with_current(|filter| filter.to_string()).ok()
    }
}

/// Handle wired to a subscriber that is not installed globally
///
/// The handle stays usable while the returned subscriber is alive.
#[cfg(test)]
pub(crate) fn detached_handle(level: &str) -> (LogLevelHandle, impl tracing::Subscriber) {
    let (filter_layer, reload_handle) = reload::Layer::new(EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(filter_layer);
    let handle = LogLevelHandle {
        inner: Arc::new(reload_handle),
    };
    (handle, subscriber)
}

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<LogLevelHandle> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, reload_handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(output_layers(&config)?)
        .try_init()?;

    Ok(LogLevelHandle {
        inner: Arc::new(reload_handle),
    })
}

fn output_layers(config: &LoggerConfig) -> anyhow::Result<Vec<BoxedLayer>> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    // File layer goes first so console ANSI settings do not leak into span
    // fields written to the file (tokio-rs/tracing#1817).
    if config.file.enabled {
        let writer = LogFileWriter::new(&config.file)?;
        let layer = match config.file.format {
            LogFormat::Full => fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .compact()
                .with_writer(writer)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_ansi(false)
                .json()
                .with_writer(writer)
                .boxed(),
        };
        layers.push(layer);
    }

    if config.console.enabled {
        let use_ansi = config.console.colored && std::io::stdout().is_terminal();
        layers.push(
            fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true)
                .boxed(),
        );
    }

    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_test_handle<F, R>(initial_level: &str, f: F) -> R
    where
        F: FnOnce(&LogLevelHandle) -> R,
    {
        let filter = EnvFilter::try_new(initial_level).unwrap_or_else(|_| EnvFilter::new("info"));
        let (filter_layer, reload_handle) = reload::Layer::new(filter);
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt::layer().with_writer(std::io::sink));

        let handle = LogLevelHandle {
            inner: Arc::new(reload_handle),
        };
        tracing::subscriber::with_default(subscriber, || f(&handle))
    }

    #[test]
    fn test_set_level_updates_filter() {
        with_test_handle("info", |handle| {
            handle.set_level("debug").unwrap();
            assert!(handle.current_level().unwrap().contains("debug"));

            handle.set_level("alerthub_rs=trace,warn").unwrap();
            let current = handle.current_level().unwrap();
            assert!(current.contains("alerthub_rs=trace"));
        });
    }

    #[test]
    fn test_set_level_rejects_invalid_directive() {
        with_test_handle("info", |handle| {
            let err = handle.set_level("alerthub_rs=loud").unwrap_err();
            assert!(matches!(err, LoggerError::Config { .. }));
            assert!(handle.current_level().unwrap().contains("info"));
        });
    }

    #[test]
    fn test_output_layers_follow_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = LoggerConfig {
            console: ConsoleConfig::new(true, false),
            file: FileConfig {
                enabled: true,
                path: temp_dir.path().join("logs/app.log"),
                append: true,
                format: LogFormat::Compact,
            },
            level: "info".to_string(),
        };

        let layers = output_layers(&config).unwrap();
        assert_eq!(layers.len(), 2);
        assert!(temp_dir.path().join("logs/app.log").exists());

        let console_only = LoggerConfig::default();
        assert_eq!(output_layers(&console_only).unwrap().len(), 1);
    }
}
