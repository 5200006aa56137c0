//! Logging setup for the orrery demo.
//!
//! Console output with uptime timestamps and targets, plus a JSON log file in
//! debug builds. `RUST_LOG` wins over the config's `debug.log_level`.

use std::fs::File;
use std::path::Path;

use orrery_config::Config;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config name a level.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "orrery.log";

/// Install the global tracing subscriber.
///
/// `log_dir` receives a JSON log file when `debug_build` is set and the
/// directory can be created. Must be called at most once per process.
///
/// ```no_run
/// use orrery_config::Config;
/// use orrery_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), cfg!(debug_assertions), Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && let Some(log_file) = create_log_file(log_dir)
    {
        subscriber.with(json_file_layer(log_file)).init();
        return;
    }

    subscriber.init();
}

/// Create `log_dir` and truncate [`LOG_FILE_NAME`] inside it.
fn create_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

/// One JSON object per event, no ANSI codes.
fn json_file_layer<S>(log_file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json()
}

/// Build the filter directive string from the config's log level.
///
/// A bare level such as `"debug"` keeps the GPU stack quiet; anything that
/// already carries per-target directives is used verbatim.
pub fn filter_directives(config: Option<&Config>) -> String {
    let level = config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty());

    match level {
        None => DEFAULT_FILTER.to_string(),
        Some(level) if level.contains('=') => level.to_string(),
        Some(level) => format!("{level},wgpu=warn,naga=warn"),
    }
}

/// An `EnvFilter` with the default directives.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter_str = default_env_filter().to_string();
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_no_config_uses_default() {
        assert_eq!(filter_directives(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_empty_level_uses_default() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_bare_level_keeps_gpu_quiet() {
        let mut config = Config::default();
        config.debug.log_level = "debug".to_string();
        assert_eq!(
            filter_directives(Some(&config)),
            "debug,wgpu=warn,naga=warn"
        );
    }

    #[test]
    fn test_explicit_directives_pass_through() {
        let mut config = Config::default();
        config.debug.log_level = "warn,orrery_render=trace".to_string();
        assert_eq!(filter_directives(Some(&config)), "warn,orrery_render=trace");
    }

    #[test]
    fn test_env_filter_parsing() {
        for filter_str in [
            "info",
            "debug,orrery_render=trace",
            "warn,orrery_scene=debug,wgpu=error",
        ] {
            assert!(
                EnvFilter::try_from(filter_str).is_ok(),
                "failed to parse filter: {filter_str}"
            );
        }
    }

    #[test]
    fn test_file_layer_writes_json_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");
        let log_file = create_log_file(&log_dir).unwrap();

        let subscriber = tracing_subscriber::registry().with(json_file_layer(log_file));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(texture = "earth", "Texture loaded");
        });

        let contents = std::fs::read_to_string(log_dir.join(LOG_FILE_NAME)).unwrap();
        let line = contents.lines().next().unwrap();
        assert!(line.starts_with('{') && line.ends_with('}'), "not JSON: {line}");
        assert!(line.contains(r#""level":"INFO""#));
        assert!(line.contains(r#""message":"Texture loaded""#));
        assert!(line.contains(r#""texture":"earth""#));
        assert!(!line.contains('\x1b'));
    }
}
