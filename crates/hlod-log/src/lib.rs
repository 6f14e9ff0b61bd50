//! Structured logging for the HLOD build tools.
//!
//! Span-based, filterable logging via the `tracing` ecosystem: console output
//! with timestamps and module paths, plus optional JSON file logging for
//! post-mortem analysis of long builds. The `log` records emitted by the
//! pipeline crates are picked up through tracing's `log` compatibility.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the build tools.
///
/// # Arguments
///
/// * `log_dir` - Optional directory for a JSON log file; `None` disables
///   file logging
/// * `level` - Optional filter override (e.g. `"debug,hlod_simplify=trace"`);
///   `RUST_LOG` takes precedence when set
///
/// # Examples
///
/// ```no_run
/// use hlod_log::init_logging;
///
/// // Console only, default level.
/// init_logging(None, None);
///
/// // Verbose, with a JSON file for post-mortem analysis.
/// init_logging(Some(std::path::Path::new("./logs")), Some("debug"));
/// ```
pub fn init_logging(log_dir: Option<&Path>, level: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_FILTER)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true) // build workers are named per asset
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("hlod.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

const DEFAULT_FILTER: &str = "info";

/// Create an `EnvFilter` with the default filter string, for tests and for
/// consistent default behavior.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_enables_info() {
        let filter = default_env_filter();
        assert!(format!("{}", filter).contains("info"));
    }

    #[test]
    fn test_per_crate_filter_parses() {
        let valid_filters = [
            "info",
            "debug,hlod_simplify=trace",
            "warn,hlod_pipeline=debug,hlod_batch=trace",
            "error",
        ];
        for filter_str in &valid_filters {
            assert!(
                EnvFilter::try_from(*filter_str).is_ok(),
                "failed to parse filter: {filter_str}"
            );
        }
    }

    #[test]
    fn test_log_file_path_layout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_file_path = temp_dir.path().join("hlod.log");
        assert_eq!(log_file_path.file_name().unwrap(), "hlod.log");
    }
}
