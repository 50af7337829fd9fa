//! Conversation tracing and prompt-render correlation for Turnstone.
//!
//! Provides the two observability seams the composition engine talks to:
//! a fire-and-forget [`TraceSink`] that receives one record per assembled
//! turn, and an optional [`CorrelationClient`] that ties prompt renders to
//! a backend's cache handles for later lookup.

pub mod correlation;
pub mod trace;

pub use correlation::{CorrelationClient, InMemoryCorrelation, RegisteredPrompt};
pub use trace::{InMemoryTraceSink, TraceEvent, TraceEventType, TracePayload, TraceSink};

/// Errors from the telemetry subsystem.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("trace sink rejected event: {0}")]
    SinkRejected(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG` when set; otherwise logs at `info` (or `debug` when
/// `verbose` is true). Intended for binaries and examples embedding the
/// engine — libraries never call this.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}
