use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Short human-readable lines.
    Compact,
    /// JSON lines, for runs whose logs are collected by another tool.
    Json,
}

/// Directive used when `RUST_LOG` is unset. Stdout carries the answers, so
/// the quiet default only lets warnings through.
pub fn default_filter(format: LogFormat, verbose: bool) -> &'static str {
    match (format, verbose) {
        (_, true) => "visit_week=debug,warn",
        (LogFormat::Json, false) => "visit_week=info",
        (LogFormat::Compact, false) => "visit_week=warn",
    }
}

/// Installs the global subscriber. Everything goes to stderr.
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(format, verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}
