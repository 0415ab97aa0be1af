//! Diagnostic logging setup for the command-line tools

use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Stdout stays reserved for the program's report. Repeated calls are no-ops.
pub fn init_tracing() {
    if INITIALISED.set(()).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal());

    // Another subscriber may already be installed (e.g. by a test harness)
    let _ = Registry::default().with(filter).with(fmt_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing();
        init_tracing();
        tracing::warn!("telemetry test message");
    }
}
