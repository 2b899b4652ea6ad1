use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    /// Directory holding the five CSV files
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Status of completed, revenue-recognised orders
    #[serde(default = "default_delivered_status")]
    pub delivered_status: String,
    #[serde(default = "default_top_products_limit")]
    pub top_products_limit: usize,
}

fn default_delivered_status() -> String {
    "Delivered".to_string()
}

fn default_top_products_limit() -> usize {
    5
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            delivered_status: default_delivered_status(),
            top_products_limit: default_top_products_limit(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[dataset]
path = "Ecommerce_Dataset"

[dashboard]
delivered_status = "Delivered"
top_products_limit = 5
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Process-wide configuration, loaded on first access
pub fn get_config() -> anyhow::Result<&'static Config> {
    CONFIG.get_or_try_init(load_config)
}

/// Resolve the dataset directory.
///
/// Absolute paths are used as is. Relative paths are tried next to the
/// executable first, then against the current directory.
pub fn get_dataset_path(config: &Config) -> PathBuf {
    let dataset_path = Path::new(&config.dataset.path);

    if dataset_path.is_absolute() {
        return dataset_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved = exe_dir.join(dataset_path);
            if resolved.is_dir() {
                return resolved;
            }
        }
    }

    PathBuf::from(&config.dataset.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.dataset.path, "Ecommerce_Dataset");
        assert_eq!(config.dashboard.delivered_status, "Delivered");
        assert_eq!(config.dashboard.top_products_limit, 5);
    }

    #[test]
    fn test_dashboard_section_is_optional() {
        let config: Config = toml::from_str("[dataset]\npath = \"/data/shop\"\n").unwrap();
        assert_eq!(config.dashboard.delivered_status, "Delivered");
        assert_eq!(get_dataset_path(&config), PathBuf::from("/data/shop"));
    }

    #[test]
    fn test_delivered_status_override() {
        let config: Config = toml::from_str(
            "[dataset]\npath = \"data\"\n[dashboard]\ndelivered_status = \"Entregue\"\n",
        )
        .unwrap();
        assert_eq!(config.dashboard.delivered_status, "Entregue");
        assert_eq!(config.dashboard.top_products_limit, 5);
    }
}
