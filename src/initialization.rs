//! Logger initialization.
//!
//! Configures `env_logger` with custom formatting. The logger reads from the
//! `RUST_LOG` environment variable by default, but the provided level
//! overrides it, so `--log-level` always wins while `RUST_LOG` still allows
//! per-module filtering during development.

use std::io::Write;

use colored::Colorize;
use log::LevelFilter;

use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `color` - Whether log level labels are colored
///
/// # Errors
///
/// Returns [`InitializationError::LoggerError`] if a logger was already
/// installed.
pub fn init_logger_with(level: LevelFilter, color: bool) -> Result<(), InitializationError> {
    colored::control::set_override(color);

    let mut builder = env_logger::Builder::from_default_env();

    // Override with CLI-provided level (takes precedence over RUST_LOG)
    builder.filter_level(level);
    // Suppress hickory chatter about malformed or truncated DNS messages;
    // those are routine when probing names that do not exist
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("domain_recon", level);

    builder.format(|buf, record| {
        let level = record.level();
        let colored_level = match level {
            log::Level::Error => level.to_string().red(),
            log::Level::Warn => level.to_string().yellow(),
            log::Level::Info => level.to_string().green(),
            log::Level::Debug => level.to_string().blue(),
            log::Level::Trace => level.to_string().purple(),
        };

        writeln!(
            buf,
            "[{}] [{}] {}",
            chrono::Local::now().format("%H:%M:%S"),
            colored_level,
            record.args()
        )
    });

    // try_init() instead of init(): tests may initialize the logger more
    // than once per process
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
