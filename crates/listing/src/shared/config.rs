use crate::list::controller::{ListingConfig, RefreshPolicy};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub listing: ListingSection,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RefreshMode {
    Manual,
    Debounced,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingSection {
    pub page_size: usize,
    pub show_all_limit: usize,
    pub refresh: RefreshMode,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

fn default_debounce_ms() -> u64 {
    300
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[listing]
page_size = 9
show_all_limit = 1000
refresh = "manual"
debounce_ms = 300

[catalog]
base_url = "http://127.0.0.1:3000"
timeout_secs = 10
"#;

/// Load configuration from a TOML file
///
/// Search order:
/// 1. Explicit path, if given and present
/// 2. config.toml next to the executable
/// 3. Falls back to embedded default config
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            return parse_config(&std::fs::read_to_string(path)?);
        }
        tracing::warn!("config not found at: {}", path.display());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return parse_config(&std::fs::read_to_string(&config_path)?);
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Разбор и проверка конфигурации
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listing.page_size == 0 {
            anyhow::bail!("listing.page_size must be greater than 0");
        }
        if self.listing.show_all_limit < self.listing.page_size {
            anyhow::bail!(
                "listing.show_all_limit ({}) must not be less than page_size ({})",
                self.listing.show_all_limit,
                self.listing.page_size
            );
        }
        if self.catalog.base_url.trim().is_empty() {
            anyhow::bail!("catalog.base_url must not be empty");
        }
        Ok(())
    }

    /// Настройки контроллера списка
    pub fn listing_config(&self) -> ListingConfig {
        let refresh = match self.listing.refresh {
            RefreshMode::Manual => RefreshPolicy::Manual,
            RefreshMode::Debounced => RefreshPolicy::Debounced {
                delay: Duration::from_millis(self.listing.debounce_ms),
            },
        };

        ListingConfig {
            page_size: self.listing.page_size,
            show_all_limit: self.listing.show_all_limit,
            refresh,
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.catalog.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.listing.page_size, 9);
        assert_eq!(config.listing.show_all_limit, 1000);
        assert_eq!(config.listing.refresh, RefreshMode::Manual);
        assert_eq!(config.fetch_timeout(), Some(Duration::from_secs(10)));

        let listing = config.listing_config();
        assert_eq!(listing.page_size, 9);
        assert_eq!(listing.refresh, RefreshPolicy::Manual);
    }

    #[test]
    fn test_debounced_refresh() {
        let config = parse_config(
            r#"
            [listing]
            page_size = 12
            show_all_limit = 500
            refresh = "debounced"

            [catalog]
            base_url = "https://api.example.vn"
            "#,
        )
        .unwrap();

        assert_eq!(config.fetch_timeout(), None);
        assert_eq!(
            config.listing_config().refresh,
            RefreshPolicy::Debounced {
                delay: Duration::from_millis(300)
            }
        );
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        let zero_page = r#"
            [listing]
            page_size = 0
            show_all_limit = 10
            refresh = "manual"
            [catalog]
            base_url = "http://localhost"
        "#;
        assert!(parse_config(zero_page).is_err());

        let small_show_all = r#"
            [listing]
            page_size = 20
            show_all_limit = 10
            refresh = "manual"
            [catalog]
            base_url = "http://localhost"
        "#;
        assert!(parse_config(small_show_all).is_err());
    }

    #[test]
    fn test_missing_explicit_path_falls_back() {
        let config = load_config(Some(Path::new("/nonexistent/listing.toml"))).unwrap();
        assert!(config.listing.page_size > 0);
    }
}
