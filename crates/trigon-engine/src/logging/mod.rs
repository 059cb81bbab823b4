//! Logger initialization.
//!
//! Centralizes `env_logger` setup so binaries get consistent output without
//! each wiring the backend themselves.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Filter precedence: the explicit `filter` string (env_logger syntax, e.g.
/// "info" or "trigon_engine=debug"), then `RUST_LOG`, then `Info`. Subsequent
/// calls are ignored.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
