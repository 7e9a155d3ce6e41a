//! Tracing initialisation for the keyword engine binary and tests.
//!
//! Diagnostics go to stderr so stdout stays free for command output.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogFormat;

/// Name reported in bunyan records.
const SERVICE_NAME: &str = "keyword-engine";

/// Install the global subscriber.
///
/// Respects `RUST_LOG`; defaults to `info`. Only the first call takes effect.
pub fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Bunyan => tracing_subscriber::registry()
            .with(env_filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(
                SERVICE_NAME.to_string(),
                std::io::stderr,
            ))
            .try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(?format, "Tracing initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(LogFormat::Pretty);
        init_tracing(LogFormat::Bunyan);
        tracing::info!("still logging after repeated init");
    }
}
