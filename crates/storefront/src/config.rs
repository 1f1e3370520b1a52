//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to documented defaults.
//!
//! - `STOREFRONT_API_URL` - REST API base URL (fallback `API_URL`, default: `http://localhost:3001/api`)
//! - `STOREFRONT_WIRE_CONVENTION` - Field naming for request bodies: `snake` or `camel` (default: `snake`)
//! - `STOREFRONT_BACKEND` - Catalog backing: `remote` or `local` (default: `remote`)
//! - `STOREFRONT_DATA_DIR` - Directory for the local cache files (default: `.preorder`)
//! - `STOREFRONT_CURRENCY` - ISO 4217 code used to format prices (default: `GHS`)
//! - `BRAND_NAME` - Brand name used in order messages (default: `{{BRAND_NAME}}`)
//! - `WHATSAPP_NUMBER` - Messaging destination with country code (default: `1234567890`)

use std::path::PathBuf;

use preorder_core::CurrencyCode;
use thiserror::Error;
use url::Url;

use crate::api::conversions::WireConvention;

const DEFAULT_API_URL: &str = "http://localhost:3001/api";
const DEFAULT_DATA_DIR: &str = ".preorder";
const DEFAULT_BRAND_NAME: &str = "{{BRAND_NAME}}";
const DEFAULT_WHATSAPP_NUMBER: &str = "1234567890";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which persistence strategy backs the catalog store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// REST API through the gateway.
    #[default]
    Remote,
    /// JSON files in the data directory.
    Local,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            other => Err(format!("expected `remote` or `local`, got `{other}`")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// REST API configuration
    pub api: ApiConfig,
    /// Catalog backing strategy
    pub backend: BackendKind,
    /// Directory holding the local cache files
    pub data_dir: PathBuf,
    /// Brand and messaging settings
    pub brand: BrandConfig,
}

/// REST API configuration for the gateway.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to
    pub base_url: Url,
    /// Field naming used for outgoing request bodies
    pub wire_convention: WireConvention,
}

/// Brand display and messaging configuration.
#[derive(Debug, Clone)]
pub struct BrandConfig {
    /// Brand name used in composed messages
    pub name: String,
    /// Messaging destination (digits, country code first)
    pub whatsapp_number: String,
    /// Currency used to format prices
    pub currency: CurrencyCode,
}

impl ApiConfig {
    /// Build an API configuration for a base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("STOREFRONT_API_URL", base_url)?,
            wire_convention: WireConvention::default(),
        })
    }

    /// Set the outgoing wire convention.
    #[must_use]
    pub const fn with_wire_convention(mut self, convention: WireConvention) -> Self {
        self.wire_convention = convention;
        self
    }
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_BRAND_NAME.to_string(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("STOREFRONT_API_URL")
            .or_else(|| lookup("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = parse_base_url("STOREFRONT_API_URL", &raw_url)?;

        let wire_convention = parse_or_default(&lookup, "STOREFRONT_WIRE_CONVENTION")?;
        let backend = parse_or_default(&lookup, "STOREFRONT_BACKEND")?;
        let currency = match lookup("STOREFRONT_CURRENCY") {
            Some(value) => value.parse().map_err(|e: preorder_core::UnknownCurrency| {
                ConfigError::InvalidEnvVar("STOREFRONT_CURRENCY".to_string(), e.to_string())
            })?,
            None => CurrencyCode::default(),
        };

        let data_dir = lookup("STOREFRONT_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let brand = BrandConfig {
            name: lookup("BRAND_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BRAND_NAME.to_string()),
            whatsapp_number: lookup("WHATSAPP_NUMBER")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_WHATSAPP_NUMBER.to_string()),
            currency,
        };

        Ok(Self {
            api: ApiConfig {
                base_url,
                wire_convention,
            },
            backend,
            data_dir,
            brand,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL, rejecting anything that is not http(s).
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse an optional variable, falling back to the type's default when unset.
fn parse_or_default<T, F>(lookup: &F, key: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = String> + Default,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or_else(
        || Ok(T::default()),
        |value| {
            value
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api.base_url.as_str(), "http://localhost:3001/api");
        assert_eq!(config.api.wire_convention, WireConvention::SnakeCase);
        assert_eq!(config.backend, BackendKind::Remote);
        assert_eq!(config.data_dir, PathBuf::from(".preorder"));
        assert_eq!(config.brand.name, "{{BRAND_NAME}}");
        assert_eq!(config.brand.whatsapp_number, "1234567890");
        assert_eq!(config.brand.currency, CurrencyCode::GHS);
    }

    #[test]
    fn test_api_url_fallback() {
        let config = load(&[("API_URL", "https://api.example.com/v1")]).unwrap();
        assert_eq!(config.api.base_url.as_str(), "https://api.example.com/v1");

        let config = load(&[
            ("API_URL", "https://fallback.example.com"),
            ("STOREFRONT_API_URL", "https://primary.example.com/api"),
        ])
        .unwrap();
        assert_eq!(config.api.base_url.as_str(), "https://primary.example.com/api");
    }

    #[test]
    fn test_invalid_api_url() {
        let err = load(&[("STOREFRONT_API_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_API_URL"));

        let err = load(&[("STOREFRONT_API_URL", "ftp://example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_WIRE_CONVENTION", "camel"),
            ("STOREFRONT_BACKEND", "local"),
            ("STOREFRONT_DATA_DIR", "/tmp/shop"),
            ("STOREFRONT_CURRENCY", "usd"),
            ("BRAND_NAME", "Kwik Imports"),
            ("WHATSAPP_NUMBER", "233201234567"),
        ])
        .unwrap();
        assert_eq!(config.api.wire_convention, WireConvention::CamelCase);
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(config.brand.currency, CurrencyCode::USD);
        assert_eq!(config.brand.name, "Kwik Imports");
        assert_eq!(config.brand.whatsapp_number, "233201234567");
    }

    #[test]
    fn test_invalid_backend() {
        let err = load(&[("STOREFRONT_BACKEND", "sqlite")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_BACKEND"));
    }

    #[test]
    fn test_blank_brand_name_uses_default() {
        let config = load(&[("BRAND_NAME", "  ")]).unwrap();
        assert_eq!(config.brand.name, "{{BRAND_NAME}}");
    }
}
