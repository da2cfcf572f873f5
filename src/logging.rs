//! Diagnostic logging
//!
//! Events go to stderr so command output on stdout stays clean for piping.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber once
///
/// Without `RUST_LOG` the filter is `ledgerbook=warn`. `verbose` raises the
/// crate's level to `info` either way.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ledgerbook=warn"));
        if verbose {
            if let Ok(directive) = "ledgerbook=info".parse() {
                filter = filter.add_directive(directive);
            }
        }

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
