//! # Logger
//!
//! Installs the process-wide `tracing` subscriber: a compact console layer and an optional
//! rolling file layer written through a non-blocking worker.
//!
//! The default level is combined with `RUST_LOG`, or replaced by an explicit directive string
//! set with [`LoggerBuilder::env_filter`] (e.g. `"valida_cpf=debug,tower_http=info"`).
//!
//! ## Example
//!
//! ```rust
//! use valida_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("valida-server")
//!     .level(LevelFilter::DEBUG)
//!     .init()?;
//! # Ok::<(), valida_logger::LoggerError>(())
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct Settings {
    level: LevelFilter,
    console: bool,
    env_filter: Option<String>,
    path: Option<PathBuf>,
    max_files: usize,
    json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            console: true,
            env_filter: None,
            path: None,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

/// Builder state before [`LoggerBuilder::name`] is called.
#[derive(Debug)]
pub struct Unnamed;
/// Builder state once the log name is known.
#[derive(Debug)]
pub struct Named(String);

mod sealed {
    pub trait State {}
    impl State for super::Unnamed {}
    impl State for super::Named {}
}

/// Configures the global subscriber. A name is required before [`LoggerBuilder::init`]
/// becomes available, since it prefixes the rolling log files.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug)]
pub struct LoggerBuilder<S: sealed::State = Unnamed> {
    settings: Settings,
    name: S,
}

impl LoggerBuilder<Unnamed> {
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder { settings: self.settings, name: Named(name.into()) }
    }
}

impl<S: sealed::State> LoggerBuilder<S> {
    /// Minimum level emitted when no directive overrides it.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Directive string used instead of `RUST_LOG`. Invalid directives fail [`LoggerBuilder::init`].
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.settings.env_filter = Some(directives.into());
        self
    }

    /// Directory for daily rolling log files. Created on init when missing.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.path = Some(path.into());
        self
    }

    /// Rotated files kept on disk.
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    /// Writes the file output as JSON lines. The console stays human-readable.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }
}

impl LoggerBuilder<Named> {
    /// Installs the subscriber for the whole process.
    ///
    /// Keep the returned [`Logger`] alive until shutdown; dropping it stops the file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank name, no outputs, a zero
    ///   `max_files` with a file output, or malformed filter directives.
    /// * [`LoggerError::Io`] or [`LoggerError::Appender`] when the log directory is unusable.
    /// * [`LoggerError::Subscriber`] when a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: Named(name) } = self;
        validate(&settings, &name)?;

        let filter = env_filter(&settings)?;
        let mut layers = Vec::new();

        if settings.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match &settings.path {
            Some(path) => {
                fs::create_dir_all(path)
                    .context(format!("Failed to create log directory {}", path.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(settings.max_files)
                    .build(path)?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file = layer().with_writer(writer).with_ansi(false);
                layers.push(if settings.json { file.json().boxed() } else { file.boxed() });
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// Keeps the background file writer alive.
#[must_use = "dropping the logger stops the background file writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: Settings::default(), name: Unnamed }
    }

    /// `true` when logs are also written to rolling files.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Flushing log files");
        }
    }
}

fn validate(settings: &Settings, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::invalid("logger name cannot be empty"));
    }
    if !settings.console && settings.path.is_none() {
        return Err(LoggerError::invalid("no output enabled, enable the console or set a path"));
    }
    if settings.path.is_some() && settings.max_files == 0 {
        return Err(LoggerError::invalid("max_files must be greater than zero"));
    }
    Ok(())
}

fn env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    match &settings.env_filter {
        Some(directives) => builder
            .parse(directives)
            .map_err(|e| LoggerError::invalid(format!("invalid filter '{directives}': {e}"))),
        None => Ok(builder.from_env_lossy()),
    }
}
