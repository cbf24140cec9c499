//! Tracing subscriber setup for hosts embedding the template workspace.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over the configured level. An invalid level
/// falls back to `info`. Only the first call installs a subscriber; the
/// return value tells whether this call did.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(output_layer(config))
        .with(filter)
        .try_init()
        .is_ok()
}

fn output_layer(config: &LoggingConfig) -> BoxedLayer {
    let spans = if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_events(spans)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_span_events(spans).boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_span_events(spans).boxed(),
    }
}
