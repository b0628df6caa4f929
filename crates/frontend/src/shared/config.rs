use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SessionConfig {
    pub token_storage_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UiConfig {
    pub page_size: usize,
    pub toast_timeout_ms: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:7000"
request_timeout_ms = 15000

[session]
token_storage_key = "jwtToken"

[ui]
page_size = 9
toast_timeout_ms = 4000
"#;

/// Build-time override of the API base URL.
const API_URL_OVERRIDE: Option<&str> = option_env!("QUICKCOURT_API_URL");

impl AppConfig {
    pub fn parse(source: &str, api_override: Option<&str>) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(source)?;
        if let Some(url) = api_override.map(str::trim).filter(|u| !u.is_empty()) {
            config.api.base_url = url.to_string();
        }
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "api.base_url",
                reason: format!("`{}` is not an http(s) URL", self.api.base_url),
            });
        }
        if self.session.token_storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "session.token_storage_key",
                reason: "must not be empty".into(),
            });
        }
        if self.ui.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "ui.page_size",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Full URL for an API path such as `/venues`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api.base_url, path)
        } else {
            format!("{}/{}", self.api.base_url, path)
        }
    }
}

/// Load the embedded configuration, applying the build-time override.
///
/// A broken override falls back to the embedded defaults.
pub fn load_config() -> AppConfig {
    match AppConfig::parse(DEFAULT_CONFIG, API_URL_OVERRIDE) {
        Ok(config) => {
            log::info!("API base URL: {}", config.api.base_url);
            config
        }
        Err(e) => {
            log::warn!("{e}; using embedded defaults");
            AppConfig::fallback()
        }
    }
}

impl AppConfig {
    fn fallback() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:7000".to_string(),
                request_timeout_ms: 15_000,
            },
            session: SessionConfig {
                token_storage_key: "jwtToken".to_string(),
            },
            ui: UiConfig {
                page_size: 9,
                toast_timeout_ms: 4_000,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::parse(DEFAULT_CONFIG, None).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:7000");
        assert_eq!(config.session.token_storage_key, "jwtToken");
        assert_eq!(config.ui.page_size, 9);
        assert_eq!(config, AppConfig::fallback());
    }

    #[test]
    fn test_override_replaces_base_url() {
        let config = AppConfig::parse(DEFAULT_CONFIG, Some("https://api.example.com/")).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.url("/venues"), "https://api.example.com/venues");
        assert_eq!(config.url("venues"), "https://api.example.com/venues");
    }

    #[test]
    fn test_blank_override_ignored() {
        let config = AppConfig::parse(DEFAULT_CONFIG, Some("  ")).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:7000");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            AppConfig::parse(DEFAULT_CONFIG, Some("localhost:7000")),
            Err(ConfigError::Invalid { field: "api.base_url", .. })
        ));
        let zero_page = DEFAULT_CONFIG.replace("page_size = 9", "page_size = 0");
        assert!(matches!(
            AppConfig::parse(&zero_page, None),
            Err(ConfigError::Invalid { field: "ui.page_size", .. })
        ));
        assert!(matches!(AppConfig::parse("[api", None), Err(ConfigError::Parse(_))));
    }
}
