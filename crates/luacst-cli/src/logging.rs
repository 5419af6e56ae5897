//! Logging to stderr.
//!
//! Quiet by default (`warn`). `RUST_LOG` overrides the filter:
//!
//! ```bash
//! RUST_LOG=debug luacst check init.lua
//! RUST_LOG=luacst_lib=debug luacst tree -s 'x = 1'
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "warn";

pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}
