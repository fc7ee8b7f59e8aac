//! Diagnostic output for the wrapper.
//!
//! Every line is `<timestamp> <LEVEL> <message>` on stderr, so the tool's own
//! stdout stays clean. The timestamp has whole-second resolution.
//!
//! `RUST_LOG` overrides the default filter for advisory output. ERROR events
//! are always written, whatever the filter says:
//! ```bash
//! RUST_LOG=wikipub=error wikipub docs/
//! ```

use tracing::Subscriber;
use tracing_subscriber::filter::{FilterExt, LevelFilter};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// `chrono` format for the leading timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DEFAULT_FILTER: &str = "wikipub=debug";

/// Install the global subscriber. Call once, first thing in `main`.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(stderr_layer(filter, std::io::stderr))
        .init();
}

/// Format layer gated by `filter`, with ERROR events let through regardless.
fn stderr_layer<S, W>(filter: EnvFilter, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + 'static,
{
    format_layer(writer).with_filter(filter.or(LevelFilter::ERROR))
}

fn format_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_target(false)
        .with_ansi(false)
}
