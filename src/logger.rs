pub use tracing::{debug, error, info, instrument, trace, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Install the global subscriber, honoring `RUST_LOG` and defaulting to `info`.
pub fn init() {
    init_with_default("info");
}

/// Like [`init`], with `default_filter` used when `RUST_LOG` is unset or invalid.
pub fn init_with_default(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Span close events carry step durations; emit them only at debug level.
    let is_debug = env_filter.to_string().contains("debug")
        || env_filter.to_string().contains("trace");

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::uptime())
        .with_span_events(if is_debug {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        });

    // A subscriber may already be installed (tests, embedding applications).
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
