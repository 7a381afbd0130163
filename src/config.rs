//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::error::PaapiError;
use crate::paapi::locales::Locale;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// PA-API credentials and client settings, loaded in layers.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// PA-API access key
    #[serde(default)]
    pub access_key: String,

    /// PA-API secret key
    #[serde(default)]
    pub secret_key: String,

    /// Associates partner tag (e.g. `mytag-20`)
    #[serde(default)]
    pub partner_tag: String,

    /// PA-API host, e.g. `webservices.amazon.com`
    #[serde(default)]
    pub host: String,

    /// AWS region used for signing, e.g. `us-east-1`
    #[serde(default)]
    pub region: String,

    /// Locale used to fill in host, region and marketplace when unset
    #[serde(default)]
    pub locale: Option<Locale>,

    /// Marketplace sent with requests (e.g. `www.amazon.de`)
    #[serde(default)]
    pub marketplace: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            secret_key: String::new(),
            partner_tag: String::new(),
            host: String::new(),
            region: String::new(),
            locale: None,
            marketplace: None,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("partner_tag", &self.partner_tag)
            .field("host", &self.host)
            .field("region", &self.region)
            .field("locale", &self.locale)
            .field("marketplace", &self.marketplace)
            .field("proxy", &self.proxy)
            .field("timeout_secs", &self.timeout_secs)
            .field("format", &self.format)
            .finish()
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from the five required fields.
    pub fn with_credentials(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        partner_tag: impl Into<String>,
        host: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            partner_tag: partner_tag.into(),
            host: host.into(),
            region: region.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("amz-paapi").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        if let Some(v) = read("PAAPI_ACCESS_KEY") {
            self.access_key = v;
        }
        if let Some(v) = read("PAAPI_SECRET_KEY") {
            self.secret_key = v;
        }
        if let Some(v) = read("PAAPI_PARTNER_TAG") {
            self.partner_tag = v;
        }
        if let Some(v) = read("PAAPI_HOST") {
            self.host = v;
        }
        if let Some(v) = read("PAAPI_REGION") {
            self.region = v;
        }
        if let Some(locale) = read("PAAPI_LOCALE") {
            if let Ok(l) = locale.parse() {
                self.locale = Some(l);
            }
        }
        if let Some(v) = read("PAAPI_PROXY") {
            self.proxy = Some(v);
        }

        self
    }

    /// Sets the locale and fills host, region and marketplace from it
    /// where they are still empty.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self.apply_locale()
    }

    /// Fills empty host, region and marketplace from the configured locale.
    pub fn apply_locale(mut self) -> Self {
        if let Some(locale) = self.locale {
            if self.host.trim().is_empty() {
                self.host = locale.host();
            }
            if self.region.trim().is_empty() {
                self.region = locale.region().to_string();
            }
            if self.marketplace.is_none() {
                self.marketplace = Some(locale.marketplace());
            }
        }
        self
    }

    /// Checks that none of the required fields is empty.
    pub fn validate(&self) -> Result<(), PaapiError> {
        let required = [
            ("access_key", &self.access_key),
            ("secret_key", &self.secret_key),
            ("partner_tag", &self.partner_tag),
            ("host", &self.host),
            ("region", &self.region),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(PaapiError::MissingField(name));
            }
        }

        Ok(())
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
