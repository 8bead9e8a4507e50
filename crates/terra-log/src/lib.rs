//! Logging setup for the terra tools.
//!
//! Console output goes through a human-readable `fmt` layer. Debug builds
//! given a log directory also write JSON lines to `terra.log` there. The
//! level comes from `RUST_LOG` when set, otherwise from the config.

use std::path::{Path, PathBuf};

use terra_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE: &str = "terra.log";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - whether to write the JSON log file at all
/// * `config` - source of the `log_level` used when `RUST_LOG` is unset
///
/// Records sent through the `log` facade are forwarded too. Calling this a
/// second time has no effect.
///
/// ```no_run
/// use terra_config::Config;
///
/// let config = Config::default();
/// terra_log::init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config_env_filter(config));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(path) = log_file_path(log_dir)
        && let Ok(log_file) = std::fs::File::create(&path)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        if subscriber.with(file_layer).try_init().is_ok() {
            tracing::debug!("Writing JSON log to {}", path.display());
        }
        return;
    }

    let _ = subscriber.try_init();
}

/// Filter directive taken from the config, `info` when absent or blank.
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

/// Filter built from the config level, `info` when the level does not parse.
fn config_env_filter(config: Option<&Config>) -> EnvFilter {
    let directive = filter_directive(config);
    EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid log_level {directive:?}: {e}");
        default_env_filter()
    })
}

fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_DIRECTIVE)
}

/// Create `log_dir` and return the log file path inside it.
fn log_file_path(log_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = log_dir?;
    std::fs::create_dir_all(dir).ok()?;
    Some(dir.join(LOG_FILE))
}
