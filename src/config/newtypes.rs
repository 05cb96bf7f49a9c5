//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Shopify Admin API access token.
///
/// This newtype ensures the token is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the token value, displaying only
/// `AccessToken(*****)` instead of the actual token.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::AccessToken;
///
/// let token = AccessToken::new("shpat_abc123").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated Shopify store domain.
///
/// This newtype validates and normalizes store domains to the full
/// `store.myshopify.com` format.
///
/// # Accepted Formats
///
/// - `store-name` - normalized to `store-name.myshopify.com`
/// - `store-name.myshopify.com` - used as-is
///
/// # Serialization
///
/// `StoreDomain` serializes to and deserializes from the full domain string:
///
/// ```rust
/// use shopify_bulk::StoreDomain;
///
/// let domain = StoreDomain::new("my-store").unwrap();
/// let json = serde_json::to_string(&domain).unwrap();
/// assert_eq!(json, r#""my-store.myshopify.com""#);
/// ```
///
/// # Example
///
/// ```rust
/// use shopify_bulk::StoreDomain;
///
/// // Short format is normalized
/// let domain = StoreDomain::new("my-store").unwrap();
/// assert_eq!(domain.as_ref(), "my-store.myshopify.com");
/// assert_eq!(domain.store_name(), "my-store");
///
/// // Full format is accepted
/// let domain = StoreDomain::new("my-store.myshopify.com").unwrap();
/// assert_eq!(domain.as_ref(), "my-store.myshopify.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreDomain {
    full_domain: String,
    store_name_end: usize,
}

impl StoreDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated store domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreDomain`] if the domain is invalid.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into();
        let domain = domain.trim().to_lowercase();

        if domain.is_empty() {
            return Err(ConfigError::InvalidStoreDomain { domain });
        }

        // Check if it's already a full domain
        let (store_name, full_domain) = if let Some(store_name) = domain.strip_suffix(Self::SUFFIX)
        {
            (store_name.to_string(), domain)
        } else if domain.contains('.') {
            // Contains a dot but not myshopify.com suffix - invalid
            return Err(ConfigError::InvalidStoreDomain { domain });
        } else {
            // Short format - needs normalization
            (domain.clone(), format!("{}{}", domain, Self::SUFFIX))
        };

        // Validate store name
        if !Self::is_valid_store_name(&store_name) {
            return Err(ConfigError::InvalidStoreDomain {
                domain: full_domain,
            });
        }

        Ok(Self {
            store_name_end: store_name.len(),
            full_domain,
        })
    }

    /// Returns the store name portion of the domain.
    ///
    /// For `my-store.myshopify.com`, this returns `my-store`.
    #[must_use]
    pub fn store_name(&self) -> &str {
        &self.full_domain[..self.store_name_end]
    }

    fn is_valid_store_name(name: &str) -> bool {
        if name.is_empty() {
            return false;
        }

        // Store names can contain lowercase letters, numbers, and hyphens
        // They cannot start or end with a hyphen
        if name.starts_with('-') || name.ends_with('-') {
            return false;
        }

        name.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for StoreDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl Serialize for StoreDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain)
    }
}

impl<'de> Deserialize<'de> for StoreDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated endpoint host URL.
///
/// When configured, all Admin API requests go to this base URL instead of
/// the store's canonical `https://{store}.myshopify.com` address. This is
/// intended for local proxies and test servers, so the port is preserved.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::HostUrl;
///
/// let url = HostUrl::new("http://localhost:3000").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.base(), "http://localhost:3000");
///
/// // Any path component is ignored for the base
/// let url = HostUrl::new("https://proxy.example.com/extra").unwrap();
/// assert_eq!(url.base(), "https://proxy.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    authority_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();

        // Find scheme
        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        // Authority (host and optional port) runs to the first path,
        // query, or fragment delimiter
        let authority_start = scheme_end + 3;
        if authority_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        let remainder = &url[authority_start..];
        let authority_end = remainder
            .find(|c| matches!(c, '/' | '?' | '#'))
            .map_or(url.len(), |i| authority_start + i);

        if url[authority_start..authority_end].is_empty() {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            authority_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the base URL: scheme plus authority, with any path stripped.
    ///
    /// Ports are kept, so `http://localhost:3000/x` yields
    /// `http://localhost:3000`.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.url[..self.authority_end]
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_empty_string() {
        let result = AccessToken::new("");
        assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
    }

    #[test]
    fn test_access_token_masks_value_in_debug() {
        let token = AccessToken::new("shpat_super-secret").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("shpat_super-secret"));
    }

    #[test]
    fn test_store_domain_normalizes_short_format() {
        let domain = StoreDomain::new("my-store").unwrap();
        assert_eq!(domain.as_ref(), "my-store.myshopify.com");
        assert_eq!(domain.store_name(), "my-store");
    }

    #[test]
    fn test_store_domain_accepts_full_format() {
        let domain = StoreDomain::new("my-store.myshopify.com").unwrap();
        assert_eq!(domain.as_ref(), "my-store.myshopify.com");
        assert_eq!(domain.store_name(), "my-store");
    }

    #[test]
    fn test_store_domain_rejects_invalid_domains() {
        // Empty
        assert!(StoreDomain::new("").is_err());

        // Invalid characters
        assert!(StoreDomain::new("my store").is_err());
        assert!(StoreDomain::new("my_store").is_err());
        assert!(StoreDomain::new("MY-STORE").is_ok()); // normalized to lowercase

        // Starting/ending with hyphen
        assert!(StoreDomain::new("-my-store").is_err());
        assert!(StoreDomain::new("my-store-").is_err());

        // Wrong domain suffix
        assert!(StoreDomain::new("my-store.otherdomain.com").is_err());
    }

    #[test]
    fn test_host_url_keeps_port_in_base() {
        let url = HostUrl::new("http://localhost:3000").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.base(), "http://localhost:3000");

        let url = HostUrl::new("http://127.0.0.1:49152/graphql").unwrap();
        assert_eq!(url.base(), "http://127.0.0.1:49152");
    }

    #[test]
    fn test_host_url_strips_path_from_base() {
        let url = HostUrl::new("https://proxy.example.com/callback?x=1").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.base(), "https://proxy.example.com");
    }

    #[test]
    fn test_host_url_rejects_invalid() {
        // No scheme
        assert!(HostUrl::new("proxy.example.com").is_err());

        // Empty host
        assert!(HostUrl::new("https://").is_err());

        // Invalid scheme
        assert!(HostUrl::new("://example.com").is_err());
    }

    // StoreDomain serialization tests
    #[test]
    fn test_store_domain_serializes_to_string() {
        let domain = StoreDomain::new("my-store").unwrap();
        let json = serde_json::to_string(&domain).unwrap();
        assert_eq!(json, r#""my-store.myshopify.com""#);
    }

    #[test]
    fn test_store_domain_deserializes_from_string() {
        let json = r#""test-store.myshopify.com""#;
        let domain: StoreDomain = serde_json::from_str(json).unwrap();
        assert_eq!(domain.as_ref(), "test-store.myshopify.com");
        assert_eq!(domain.store_name(), "test-store");
    }

    #[test]
    fn test_store_domain_round_trip_serialization() {
        let original = StoreDomain::new("my-store").unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let restored: StoreDomain = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
