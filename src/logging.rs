//! Structured logging setup for applications embedding the QC engine.
//!
//! The library itself only emits `tracing` events; this helper installs a
//! subscriber for callers that do not configure their own.

use tracing::{Level, debug};

/// Install a global `tracing` subscriber writing to stderr
///
/// `RUST_LOG` takes precedence over `level`. Returns `false` if a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_logging(level: Level, compact: bool) -> bool {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sensor_qc={}", level)));

    let installed = if compact {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        debug!("Logging initialized at level: {}", level);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_initialization_is_a_no_op() {
        let _ = init_logging(Level::DEBUG, true);
        assert!(!init_logging(Level::INFO, false));
    }
}
