//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn, LevelFilter};

/// Initialize the logging system from the `RUST_LOG` environment
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default level
///
/// The environment still wins: `RUST_LOG` overrides `level` when set.
pub fn init_with_level(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
