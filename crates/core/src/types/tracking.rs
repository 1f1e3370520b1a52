//! Shipment tracking codes.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ShippingRoute;

const RANDOM_SUFFIX_LEN: usize = 8;
const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A human-shareable shipment code such as `SEA-000001-ABC`.
///
/// Codes are stored as entered. Lookups compare case-insensitively, so
/// customers can type `sea-000001-abc` and still find their package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingCode(String);

impl TrackingCode {
    /// Wrap an existing code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generate a fresh code for a route: `SEA-123456-7K2M9QXA`.
    ///
    /// The middle segment is the last six digits of the current epoch
    /// milliseconds, the suffix is eight random base-36 characters.
    #[must_use]
    pub fn generate(route: ShippingRoute) -> Self {
        let millis = chrono::Utc::now().timestamp_millis().rem_euclid(1_000_000);
        let mut rng = rand::rng();
        let suffix: String = (0..RANDOM_SUFFIX_LEN)
            .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
            .collect();

        Self(format!("{}-{millis:06}-{suffix}", route.tracking_prefix()))
    }

    /// Get the code as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Case-insensitive exact match against a user-supplied query.
    ///
    /// Surrounding whitespace in the query is ignored.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        !query.is_empty() && self.0.trim().to_lowercase() == query.to_lowercase()
    }

    /// Case-insensitive substring match, used by admin search.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.0.to_lowercase().contains(&term.to_lowercase())
    }
}

impl fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TrackingCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for TrackingCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_case_insensitive() {
        let code = TrackingCode::new("SEA-000001-ABC");
        assert!(code.matches("sea-000001-abc"));
        assert!(code.matches("  Sea-000001-Abc "));
        assert!(!code.matches("SEA-000001"));
        assert!(!code.matches(""));
    }

    #[test]
    fn test_contains() {
        let code = TrackingCode::new("AIR-123456-XYZ");
        assert!(code.contains("123"));
        assert!(code.contains("xyz"));
        assert!(!code.contains("SEA"));
    }

    #[test]
    fn test_generate_shape() {
        let code = TrackingCode::generate(ShippingRoute::Air);
        let parts: Vec<&str> = code.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.first().copied(), Some("AIR"));
        assert_eq!(parts.get(1).map(|p| p.len()), Some(6));
        let suffix = parts.get(2).copied().unwrap_or_default();
        assert_eq!(suffix.len(), RANDOM_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_uses_route_prefix() {
        assert!(
            TrackingCode::generate(ShippingRoute::Sea)
                .as_str()
                .starts_with("SEA-")
        );
    }
}
