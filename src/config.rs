use std::path::PathBuf;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Read from the environment:
// - ORDER_CART_CATALOG: path to a JSON catalog (unset/empty = built-in demo)
// - ORDER_CART_LOG:     default log filter (RUST_LOG still wins)
//
// ============================================================================

pub const CATALOG_PATH_VAR: &str = "ORDER_CART_CATALOG";
pub const LOG_FILTER_VAR: &str = "ORDER_CART_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info,order_cart=debug";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// JSON catalog to load instead of the built-in one
    pub catalog_path: Option<PathBuf>,
    /// Filter used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build a config from key/value pairs; unknown keys are ignored
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let value: String = value.into();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_ref() {
                CATALOG_PATH_VAR => config.catalog_path = Some(PathBuf::from(value)),
                LOG_FILTER_VAR => config.log_filter = value.to_string(),
                _ => {}
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.catalog_path.is_none());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_from_vars() {
        let config = AppConfig::from_vars(vec![
            ("ORDER_CART_CATALOG", "/etc/cart/menu.json"),
            ("ORDER_CART_LOG", "warn"),
            ("HOME", "/root"),
        ]);

        assert_eq!(config.catalog_path, Some(PathBuf::from("/etc/cart/menu.json")));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = AppConfig::from_vars(vec![
            ("ORDER_CART_CATALOG", ""),
            ("ORDER_CART_LOG", "   "),
        ]);

        assert_eq!(config, AppConfig::default());
    }
}
