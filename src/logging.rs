use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "CHATCONNECT_LOG";

/// Filter used when `RUST_LOG` is unset: our own events at info, the HTTP
/// stack only when it warns.
pub const DEFAULT_FILTER: &str = "warn,chatconnect=info";

/// Route `tracing` events to a log file named by `CHATCONNECT_LOG`.
///
/// Unset or empty means no logging at all, so command output stays clean.
/// Each run writes `{path}.{pid}.log` next to the requested path.
pub fn init_tracing() {
    let Some(log_path) = std::env::var(LOG_ENV).ok().filter(|p| !p.is_empty()) else {
        return;
    };
    let log_file = run_log_path(Path::new(&log_path), std::process::id());

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Warning: cannot create log directory {}: {}", parent.display(), e);
            return;
        }
    }
    let file = match std::fs::File::create(&log_file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot create log file {}: {}", log_file.display(), e);
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter_from_env())
        .with(file_layer)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        "chatconnect started"
    );
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn run_log_path(base: &Path, pid: u32) -> std::path::PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{}.log", pid));
    name.into()
}
