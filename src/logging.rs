//! Logger setup for the native binary.

use crate::config::LogLevel;

/// Install `env_logger` at `level`. A `RUST_LOG` filter, when set, is applied
/// on top and wins for the modules it names.
pub fn init(level: LogLevel) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level.to_level_filter())
        .format_timestamp_millis();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init()
}
