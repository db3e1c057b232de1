//! Logging setup
//!
//! The engine logs through the `log` facade; hosts call [`init`] (or
//! [`init_with_level`]) once to route records to `env_logger`.

pub use log::{debug, error, info, trace, warn};

/// Initialize logging from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging, falling back to `default_level` when `RUST_LOG` is unset.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with_level(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
