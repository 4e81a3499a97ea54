//! Shared `tracing` setup so every binary embedding `rterm` configures
//! logging the same way instead of reinventing a subscriber each time.

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RTERM_LOG` (falling back to
/// `info`). Call once, near the start of `main`.
///
/// # Panics
/// Panics if a global subscriber is already installed.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("RTERM_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
