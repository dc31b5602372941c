//! Log output setup
//!
//! Logs go to stderr so stdout carries only dashboard output (or JSON).

use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is not set
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "wxdash=debug,warn",
        _ => "wxdash=trace,info",
    }
}

/// Initialize tracing output. `RUST_LOG` takes precedence over `verbosity`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
