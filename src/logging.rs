//! Diagnostics for the binaries, answers still go to stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr subscriber filtered by `RUST_LOG`, `warn` if unset.
///
/// ```bash
/// RUST_LOG=guard_patrol=debug part2 --parallel inputs.txt
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
