use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub explorer: ExplorerSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExplorerSettings {
    /// Quiet period before a search keystroke re-runs the live query
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Upper bound for uploaded payloads
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
    /// Dataset loaded at startup, relative paths resolve next to the executable
    #[serde(default)]
    pub initial_dataset: Option<String>,
    #[serde(default)]
    pub initial_collection: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directory")]
    pub directory: String,
    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_max_upload_mb() -> usize {
    64
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filter() -> String {
    "info,tower_http=warn".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            max_upload_mb: default_max_upload_mb(),
            initial_dataset: None,
            initial_collection: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            filter: default_log_filter(),
        }
    }
}

impl ExplorerSettings {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3000

[explorer]
search_debounce_ms = 300
max_upload_mb = 64

[logging]
directory = "logs"
filter = "info,tower_http=warn"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
///
/// Tracing is not initialized yet when this runs, so messages go to stdout.
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                println!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                println!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    println!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Resolve a configured path: absolute as is, relative next to the executable
pub fn resolve_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    // Fallback: relative to current directory
    PathBuf::from(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.explorer.search_debounce_ms, 300);
        assert_eq!(config.explorer.search_debounce(), Duration::from_millis(300));
        assert!(config.explorer.initial_dataset.is_none());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("[explorer]\ninitial_dataset = \"data/books.json\"\n").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.explorer.max_upload_bytes(), 64 * 1024 * 1024);
        assert_eq!(config.explorer.initial_dataset.as_deref(), Some("data/books.json"));
        assert_eq!(config.logging.directory, "logs");
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let absolute = std::env::temp_dir().join("dataset.json");
        let resolved = resolve_path(absolute.to_str().unwrap());
        assert_eq!(resolved, absolute);
    }
}
