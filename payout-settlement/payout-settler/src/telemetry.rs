//! Logging setup for the settler binary

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Configure the logging subscriber, filtered by `RUST_LOG` with a default of
/// `info`
pub fn setup_logging(json: bool) {
    let filter =
        EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy();

    let fmt_layer = if json {
        fmt::layer().with_file(true).with_line_number(true).json().flatten_event(true).boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
