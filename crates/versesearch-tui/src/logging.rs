use std::{env, fs, fs::File, path::PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use versesearch_core::Config;

/// Environment variable enabling logs, using `EnvFilter` syntax (e.g. `debug`)
pub const LOG_ENV: &str = "VERSESEARCH_LOG";

/// Resolves the log path and filter from the config and environment.
/// Returns `None` for the filter when logging is disabled.
pub fn resolve_path_and_filter(config: &Config) -> (PathBuf, Option<String>) {
    let env_filter = env::var(LOG_ENV).ok().filter(|f| !f.trim().is_empty());
    let logs_path = dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("versesearch")
        .join("versesearch.log");
    let filter = env_filter.or_else(|| config.log_filter.clone());
    (logs_path, filter)
}

/// Send tracing output to a file; the terminal belongs to the TUI
pub fn init(logs_path: PathBuf, filter: Option<String>) -> Result<()> {
    let Some(filter) = filter else {
        return Ok(());
    };

    if let Some(parent) = logs_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Couldn't create the log directory: {}", parent.display()))?;
    }
    let log_file = File::create(&logs_path)
        .with_context(|| format!("Couldn't create the log file: {}", logs_path.display()))?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .parse(filter)
        .context("Couldn't parse the log filter")?;

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(file_layer).init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_filter() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("versesearch.log");

        init(path.clone(), None).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_config_filter_used_when_env_unset() {
        if env::var(LOG_ENV).is_ok() {
            return;
        }
        let config = Config {
            log_filter: Some("debug".to_string()),
            ..Config::new()
        };
        let (path, filter) = resolve_path_and_filter(&config);
        assert_eq!(filter.as_deref(), Some("debug"));
        assert!(path.ends_with("versesearch/versesearch.log"));
    }
}
