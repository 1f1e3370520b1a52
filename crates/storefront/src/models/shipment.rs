//! Shipment models.

use chrono::{DateTime, Utc};
use preorder_core::{DEFAULT_PACKAGE_STATUS, PackageId, ShippingRoute, TrackingCode};
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, require, require_if_present};

/// A tracked shipment, created by staff after an off-platform sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub tracking_code: TrackingCode,
    /// Free text, usually one of `RECOMMENDED_PACKAGE_STATUSES`.
    pub status: String,
    #[serde(default)]
    pub shipping_route: ShippingRoute,
    pub current_location: String,
    pub origin: String,
    pub destination: String,
    /// Never changes after creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub estimated_delivery: Option<String>,
}

/// Fields submitted when creating a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPackage {
    pub tracking_code: TrackingCode,
    pub status: String,
    pub shipping_route: ShippingRoute,
    pub current_location: String,
    pub origin: String,
    pub destination: String,
    pub estimated_delivery: Option<String>,
}

/// Partial update for a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagePatch {
    pub tracking_code: Option<TrackingCode>,
    pub status: Option<String>,
    pub shipping_route: Option<ShippingRoute>,
    pub current_location: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub estimated_delivery: Option<String>,
}

impl NewPackage {
    /// Start a China-to-Ghana sea shipment in the first status.
    #[must_use]
    pub fn new(tracking_code: TrackingCode) -> Self {
        Self {
            tracking_code,
            status: DEFAULT_PACKAGE_STATUS.to_string(),
            shipping_route: ShippingRoute::Sea,
            current_location: "China".to_string(),
            origin: "China".to_string(),
            destination: "Ghana".to_string(),
            estimated_delivery: None,
        }
    }

    /// Check the admin form rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(self.tracking_code.as_str(), ValidationError::EmptyTrackingCode)?;
        require(&self.status, ValidationError::EmptyPackageStatus)?;
        require(&self.current_location, ValidationError::EmptyLocation)
    }

    /// Materialize the package with both timestamps set to `now`.
    #[must_use]
    pub fn into_package(self, id: PackageId, now: DateTime<Utc>) -> Package {
        Package {
            id,
            tracking_code: self.tracking_code,
            status: self.status,
            shipping_route: self.shipping_route,
            current_location: self.current_location,
            origin: self.origin,
            destination: self.destination,
            created_at: now,
            updated_at: now,
            estimated_delivery: self.estimated_delivery,
        }
    }
}

impl PackagePatch {
    /// Check the admin form rules for every present field.
    ///
    /// # Errors
    ///
    /// Returns the first rule a present field breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_if_present(
            self.tracking_code.as_ref().map(TrackingCode::as_str),
            ValidationError::EmptyTrackingCode,
        )?;
        require_if_present(self.status.as_deref(), ValidationError::EmptyPackageStatus)?;
        require_if_present(self.current_location.as_deref(), ValidationError::EmptyLocation)
    }

    /// Apply present fields and stamp `updated_at`.
    pub fn apply_to(&self, package: &mut Package, now: DateTime<Utc>) {
        if let Some(code) = &self.tracking_code {
            package.tracking_code = code.clone();
        }
        if let Some(status) = &self.status {
            package.status.clone_from(status);
        }
        if let Some(route) = self.shipping_route {
            package.shipping_route = route;
        }
        if let Some(location) = &self.current_location {
            package.current_location.clone_from(location);
        }
        if let Some(origin) = &self.origin {
            package.origin.clone_from(origin);
        }
        if let Some(destination) = &self.destination {
            package.destination.clone_from(destination);
        }
        if let Some(delivery) = &self.estimated_delivery {
            package.estimated_delivery = Some(delivery.clone());
        }
        package.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_new_package_defaults() {
        let input = NewPackage::new(TrackingCode::new("SEA-000001-ABC"));
        assert_eq!(input.status, "Order Made");
        assert_eq!(input.shipping_route, ShippingRoute::Sea);
        assert_eq!(input.origin, "China");
        assert_eq!(input.destination, "Ghana");
        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn test_new_package_rules() {
        let input = NewPackage::new(TrackingCode::new(" "));
        assert_eq!(input.validate(), Err(ValidationError::EmptyTrackingCode));

        let mut input = NewPackage::new(TrackingCode::new("AIR-1"));
        input.status = String::new();
        assert_eq!(input.validate(), Err(ValidationError::EmptyPackageStatus));

        let mut input = NewPackage::new(TrackingCode::new("AIR-1"));
        input.current_location = String::new();
        assert_eq!(input.validate(), Err(ValidationError::EmptyLocation));
    }

    #[test]
    fn test_patch_refreshes_updated_at_only() {
        let created = Utc::now() - Duration::days(3);
        let mut package =
            NewPackage::new(TrackingCode::new("SEA-1")).into_package(PackageId::new("1"), created);
        let later = created + Duration::days(2);

        let patch = PackagePatch {
            status: Some("In Transit to Ghana".to_string()),
            current_location: Some("In Transit".to_string()),
            ..PackagePatch::default()
        };
        patch.apply_to(&mut package, later);

        assert_eq!(package.status, "In Transit to Ghana");
        assert_eq!(package.created_at, created);
        assert_eq!(package.updated_at, later);
    }
}
