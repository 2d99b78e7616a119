//! Logging Infrastructure
//!
//! Console output, plus an optional daily rotating JSON file.
//! `RUST_LOG` overrides the level passed in.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

use crate::{ClientError, ClientResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Console logging at `info`
pub fn init_logger() -> ClientResult<()> {
    init_logger_with_file("info", false, None)
}

/// Initialize logging
///
/// # Arguments
/// * `level` - default filter, e.g. `"info"` or `"hr_client=debug"`
/// * `json_format` - JSON console output instead of human-readable lines
/// * `log_dir` - also write `hr-client.YYYY-MM-DD` files here
///
/// Fails if a global subscriber is already installed.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> ClientResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if json_format {
        layers.push(fmt::layer().json().with_target(true).boxed());
    } else {
        layers.push(fmt::layer().with_target(false).boxed());
    }

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| ClientError::Config(format!("cannot create log dir {}: {e}", dir.display())))?;
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "hr-client");
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(appender)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| ClientError::Config(format!("logger already initialized: {e}")))
}
