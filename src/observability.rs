//! This module provides observability and diagnostics capabilities for the coder.
//!
//! The `log_metric!` macro emits structured key/value diagnostics through the
//! `log` facade. It is compiled out of release builds by `#[cfg(debug_assertions)]`.
//! `enable_verbose_logging` installs an `env_logger` backend once per process for
//! applications that do not bring their own logger.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Once;

use colored::Colorize;
use log::{Level, LevelFilter};

use crate::error::HuffmanError;

/// Logs a structured key-value metric line at debug level, only in debug builds.
///
/// # Example
/// ```
/// use huffpack::log_metric;
/// let distinct = 4;
/// log_metric!("event"="build_tree", "distinct_symbols"=&distinct);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            $crate::__log::debug!(target: "huffpack::metrics", "HUFFPACK_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `Info` level.
///
/// Lines are formatted as `[LEVEL] message`. With `log_file`, output is
/// appended to that file instead of stderr. Only the first call in a process
/// has any effect; later calls (or an already-installed logger) are ignored.
pub fn enable_verbose_logging(log_file: Option<&Path>) -> Result<(), HuffmanError> {
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };
    let colorize = file.is_none();

    INIT_LOGGER.call_once(move || {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);

        // Custom formatter: just print the level and message
        builder.format(move |buf, record| {
            use std::io::Write;
            let level = if colorize {
                paint_level(record.level())
            } else {
                record.level().to_string()
            };
            writeln!(buf, "[{}] {}", level, record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });

    Ok(())
}

fn paint_level(level: Level) -> String {
    let name = level.to_string();
    match level {
        Level::Error => name.red().bold().to_string(),
        Level::Warn => name.yellow().bold().to_string(),
        Level::Info => name.green().to_string(),
        Level::Debug => name.blue().to_string(),
        Level::Trace => name.dimmed().to_string(),
    }
}
