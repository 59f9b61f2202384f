use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Result, ScrappeyError};

/// Default Scrappey publisher endpoint.
pub const DEFAULT_BASE_URL: &str = "https://publisher.scrappey.com/api/v1";
/// Default transport timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// http client config
    #[serde(default)]
    pub client: ClientConfig,
    /// credentials used when a context does not bring its own
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// api base url, the operation endpoint is appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// transport timeout in milliseconds, defaults to 60000
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Scrappey API credentials as stored by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// api key, sent as the `key` query parameter
    #[serde(alias = "api_key")]
    pub api_key: String,
    /// proxy used when the proxy source is the credentials
    #[serde(default, alias = "proxy_url")]
    pub proxy_url: Option<String>,
    /// domains the remote browser may load
    #[serde(default, alias = "whitelisted_domains")]
    pub whitelisted_domains: Option<WhitelistedDomains>,
}

/// Whitelisted domains, either a comma-separated string or a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WhitelistedDomains {
    List(Vec<String>),
    Csv(String),
}

impl WhitelistedDomains {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            WhitelistedDomains::List(list) => list.clone(),
            WhitelistedDomains::Csv(csv) => csv.split(',').map(|domain| domain.trim().to_string()).collect(),
        }
    }
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_proxy_url(
        mut self,
        proxy_url: impl Into<String>,
    ) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    pub fn with_whitelisted_domains(
        mut self,
        domains: WhitelistedDomains,
    ) -> Self {
        self.whitelisted_domains = Some(domains);
        self
    }

    /// Credential proxy url, if one is configured and non-empty.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|err| ScrappeyError::IoError(format!("failed to load config file {:?}: {}", path.as_ref(), err)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        Ok(config)
    }
}
