//! Logging setup. Library code logs through the `log` facade; this installs
//! an `env_logger` backend whose default level follows the app mode.

use crate::config::AppConfig;

/// Target used for façade request tracing
pub const API_LOG_TARGET: &str = "mintledger::api";

/// Install the logger. `RUST_LOG` overrides the mode-derived default.
/// Returns false when a logger was already installed.
pub fn init(config: &AppConfig) -> bool {
    let default_filter = if config.debug { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
