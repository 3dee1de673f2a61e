pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "pocket_ledger=info";

/// Installs the global tracing subscriber. Uses `RUST_LOG` when set, otherwise
/// info-level output for this crate. Logs go to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

fn build_filter(rust_log: Option<&str>) -> EnvFilter {
    let directives = rust_log
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE);
    EnvFilter::new(directives)
}
