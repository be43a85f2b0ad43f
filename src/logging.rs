//! Logging setup
//!
//! One rolling file sink, plus a human-readable stdout sink unless JSON
//! output is selected. `RUST_LOG` overrides the configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::AppConfig;

/// Map the `rotation` setting; anything unrecognised means a single file.
fn rotation_of(name: &str) -> Rotation {
    match name.to_ascii_lowercase().as_str() {
        "minutely" => Rotation::MINUTELY,
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        _ => Rotation::NEVER,
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process or buffered file output is lost.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let appender = RollingFileAppender::new(
        rotation_of(&config.rotation),
        &config.log_dir,
        &config.log_file,
    );
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // Transfer logs carry transfer_id as a field, so JSON keeps targets for querying
    let json_layer = config.use_json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(file_writer.clone())
    });
    let text_layers = (!config.use_json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(file_writer)
            .and_then(fmt::layer().with_target(false))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layers)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_names() {
        assert_eq!(rotation_of("hourly"), Rotation::HOURLY);
        assert_eq!(rotation_of("Daily"), Rotation::DAILY);
        assert_eq!(rotation_of("never"), Rotation::NEVER);
        assert_eq!(rotation_of("weekly"), Rotation::NEVER);
    }
}
