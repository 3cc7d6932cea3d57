//! Tracing initialization: console and log file share the same fmt layer
//! output (level, target, span, all fields).

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Initializes the global tracing subscriber.
///
/// One fmt layer writes to stdout and appends to `log_file_path` through a tee
/// writer, so console and file output are identical. The level filter comes
/// from `RUST_LOG` (default `info`); load `.env` before calling this or
/// `RUST_LOG` from the file will not be seen.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    let file = Arc::new(file);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    use tracing_subscriber::fmt::writer::MakeWriterExt;
    let writer = io::stdout.and(file);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_opens_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.log");
        let path = path.to_str().unwrap();

        init_tracing(path).unwrap();
        tracing::info!("logger smoke");

        assert!(std::path::Path::new(path).exists());
    }
}
