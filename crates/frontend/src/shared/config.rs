use serde::Deserialize;

use crate::shared::browser_storage;

/// localStorage key holding a JSON object that overrides the defaults
const CONFIG_OVERRIDE_KEY: &str = "app_config";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FrontendConfig {
    /// Port of the backend API on the page's host
    pub api_port: u16,
    /// Language used when neither a saved choice nor the browser gives one
    pub default_language: String,
    /// Namespace prefix of ids minted for user menu items
    pub user_item_id_prefix: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
{
    "api_port": 3000,
    "default_language": "ru",
    "user_item_id_prefix": "user"
}
"#;

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_port: 3000,
            default_language: "ru".to_string(),
            user_item_id_prefix: "user".to_string(),
        }
    }
}

/// Parse an override blob, falling back to defaults for missing fields
/// and to the embedded configuration when the blob is unusable.
pub fn parse_config(override_json: Option<&str>) -> FrontendConfig {
    if let Some(raw) = override_json.filter(|s| !s.trim().is_empty()) {
        match serde_json::from_str::<FrontendConfig>(raw) {
            Ok(config) => return config,
            Err(e) => log::warn!("Ignoring invalid {}: {}", CONFIG_OVERRIDE_KEY, e),
        }
    }
    serde_json::from_str(DEFAULT_CONFIG).unwrap_or_default()
}

/// Load configuration
///
/// Search order:
/// 1. JSON override in localStorage (`app_config`)
/// 2. Falls back to embedded default config
pub fn load_config() -> FrontendConfig {
    parse_config(browser_storage::get_local(CONFIG_OVERRIDE_KEY).as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<FrontendConfig, _> = serde_json::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        assert_eq!(config.unwrap(), FrontendConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(Some(r#"{"api_port": 8080}"#));
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.default_language, "ru");
        assert_eq!(config.user_item_id_prefix, "user");
    }

    #[test]
    fn test_invalid_override_uses_defaults() {
        assert_eq!(parse_config(Some("{not json")), FrontendConfig::default());
        assert_eq!(parse_config(None), FrontendConfig::default());
    }
}
