//! # rccr-logging
//!
//! Logging for the rccr text polisher.
//!
//! Two layers are kept apart. [`init_tracing`] installs the `tracing`
//! subscriber that carries library diagnostics (dictionary loading,
//! corrector spawns, critique evaluation). [`Logger`] reports the lifecycle
//! of a polish request as [`LogEvent`]s: started, critique completed,
//! correction started, refine completed, polish completed, or an error.
//!
//! ## Key Types
//!
//! - [`Logger`] - Polish request events on stderr, optionally mirrored to a JSONL file
//! - [`LogEvent`] - One step of a polish request
//! - [`LogFormat`] - Output formats (Pretty, JSON, Compact)

mod events;

pub use events::{LogEvent, LogFormat, Logger};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when the requested one does not parse
pub const DEFAULT_LEVEL: &str = "warn";

/// Initialize tracing for the application.
///
/// `RUST_LOG` takes priority over `level`. Diagnostics go to stderr so that
/// stdout carries only the polished output.
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}

/// `level` if it is a valid filter directive, otherwise [`DEFAULT_LEVEL`]
fn filter_directive(level: &str) -> &str {
    match EnvFilter::try_new(level) {
        Ok(_) => level,
        Err(e) => {
            eprintln!("Ignoring invalid log level '{}': {}", level, e);
            DEFAULT_LEVEL
        }
    }
}
