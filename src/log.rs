// src/log.rs
use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::consts::{LOG_FILE, STORE_DIR};

static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber: stderr plus `.store/debug.log`.
/// `RUST_LOG` overrides the default `info` filter. Call once, from a binary.
pub fn init() -> std::io::Result<()> {
    init_in(Path::new(STORE_DIR))
}

pub fn init_in(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, LOG_FILE));
    let _ = GUARD.set(guard);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // a subscriber may already be installed (tests, embedding apps)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init();
    Ok(())
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warning-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
