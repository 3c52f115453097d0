//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging with a filter string such as `"info"` or
/// `"habitat_engine=debug"`.
///
/// `RUST_LOG` still wins when set. Returns an error if a logger was already
/// installed, which callers running several sessions in one process can ignore.
pub fn init_with_level(filter: &str) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    builder.try_init()
}
