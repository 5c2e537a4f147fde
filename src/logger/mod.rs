//! Logger Module
//!
//! Installs a `tracing-subscriber` registry with:
//! - Console output with color control (ANSI only on a terminal)
//! - File output in full, compact or JSON format
//! - `EnvFilter` driven levels, so `logger.level` accepts directives
//!   such as `info,tower_http=debug`

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use writer::FileWriter;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;
    let filter = config.filter()?;

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

    // File layer goes first: a preceding ANSI console layer would leak color
    // codes into span fields of the file output (tokio-rs/tracing#1817).
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::Init {
            message: e.to_string(),
        })
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = FileWriter::new(config)?;
    let layer = fmt::layer().with_ansi(false).with_writer(writer);

    Ok(match config.format {
        LogFormat::Full => layer.with_target(true).boxed(),
        LogFormat::Compact => layer.with_target(true).compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    })
}
