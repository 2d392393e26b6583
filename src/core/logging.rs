//! Tracing subscriber setup
//!
//! The library itself only emits `tracing` events. Hosts without their own
//! subscriber can call [`init_tracing`] once at startup.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, or `default_directive` when unset
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_ignored() {
        //! Only the first call in a process can install the global subscriber
        let _ = init_tracing("debug");
        assert!(!init_tracing("info"));
    }
}
