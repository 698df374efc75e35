use crate::browser::query::PageLimit;
use crate::browser::selection::SelectionPolicy;
use crate::error::{Error, Result};
use url::Url;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub browse: BrowseConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the catalog API; `/recipes` and `/recipes/search` are appended.
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct BrowseConfig {
    pub default_limit: PageLimit,
    pub selection_policy: SelectionPolicy,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("RECIPES_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".to_string());

        let timeout_seconds = std::env::var("REQUEST_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid REQUEST_TIMEOUT value".to_string()))?;

        let default_limit = std::env::var("DEFAULT_PAGE_LIMIT")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DEFAULT_PAGE_LIMIT value".to_string()))?;

        let selection_policy = std::env::var("SELECTION_POLICY")
            .unwrap_or_else(|_| "clear-missing".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SELECTION_POLICY value".to_string()))?;

        Ok(Settings {
            api: ApiConfig {
                base_url,
                timeout_seconds,
                user_agent: format!("Recipe-Browser/{}", env!("CARGO_PKG_VERSION")),
            },
            browse: BrowseConfig {
                default_limit,
                selection_policy,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api.base_url)?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::Config(format!(
                    "API URL must use http or https scheme, got {scheme}"
                )));
            }
        }

        if url.host_str().is_none() {
            return Err(Error::Config("API URL must have a host".to_string()));
        }

        if self.api.timeout_seconds == 0 {
            return Err(Error::Config("Request timeout must be non-zero".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            api: ApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                timeout_seconds: 30,
                user_agent: "test".to_string(),
            },
            browse: BrowseConfig {
                default_limit: PageLimit::Fifteen,
                selection_policy: SelectionPolicy::ClearMissing,
            },
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = settings();
        assert!(settings.validate().is_ok());

        settings.api.timeout_seconds = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_api_url_validation() {
        let mut settings = settings();

        settings.api.base_url = "https://recipes.example.com".to_string();
        assert!(settings.validate().is_ok());

        settings.api.base_url = "ftp://recipes.example.com".to_string();
        assert!(settings.validate().is_err());

        settings.api.base_url = "not-a-url".to_string();
        assert!(settings.validate().is_err());
    }
}
