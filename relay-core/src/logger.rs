//! Logging initialization for the relay.
//!
//! One plain-text line per event, written to stdout and optionally teed to a file:
//!
//! ```text
//! 2026-01-05 09:14:02  INFO notify_relay::fanout: step: event fanned out recipients=3 failed=0
//! ```
//!
//! Registration lines carry `chat_id` (and `message_id` for inbound Telegram messages);
//! fan-out lines carry `channel`, `recipients` and `failed`; failures add `error`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use tracing_subscriber::{
    fmt::format::{FmtSpan, Writer},
    fmt::time::FormatTime,
    fmt::writer::{BoxMakeWriter, MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Local time in `YYYY-MM-DD HH:MM:SS`.
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{} ", t)
    }
}

/// Initializes the global tracing subscriber.
///
/// Output format: `YYYY-MM-DD HH:MM:SS LEVEL target: message key=value ...`, no ANSI codes.
/// When `log_file_path` is set, lines are teed to stdout and the file (parent directories are
/// created). Level comes from `RUST_LOG`; default `info`. Load `.env` before calling.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let writer = match log_file_path {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(io::stdout.and(std::sync::Arc::new(file)))
        }
        None => BoxMakeWriter::new(io::stdout),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let event_format = tracing_subscriber::fmt::format()
        .with_timer(ChronoLocal)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .event_format(event_format)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
