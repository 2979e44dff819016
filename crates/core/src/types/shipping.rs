//! Shipping package, zone, and method-instance records.
//!
//! These mirror the host platform's storage read-only: the bridge never
//! creates or mutates any of them, it only reshapes them into the flat
//! choice list the delivery-date settings page renders.

use serde::{Deserialize, Serialize};

use super::id::{InstanceId, PackageId, ZoneId};
use super::method::MethodType;

/// A published shipping package: a named grouping of cart contents that can
/// carry its own delivery-date rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPackage {
    /// Host record identifier.
    pub id: PackageId,
    /// Display title, also used for exact-match resolution.
    pub title: String,
    /// Manual sort order; the lowest published value is the default package.
    pub menu_order: i64,
}

/// A configured shipping-method instance, scoped to exactly one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInstance {
    /// Method implementation identifier (e.g. `"flat_rate"`).
    pub method_type: MethodType,
    /// Host instance identifier.
    pub instance_id: InstanceId,
    /// Display title of this instance.
    pub title: String,
}

/// A raw zone-method association as stored by the host, before the method
/// instance has been constructed through the capability registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    pub method_type: MethodType,
    pub instance_id: InstanceId,
}

/// A shipping zone and the method instances configured inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingZone {
    /// Zone identifier; [`ZoneId::REST_OF_THE_WORLD`] marks the synthetic
    /// fallback zone.
    pub id: ZoneId,
    /// Zone display name.
    pub name: String,
    /// Methods in host order.
    pub methods: Vec<MethodInstance>,
}

impl ShippingZone {
    /// The synthetic fallback zone for methods not assigned to any explicit
    /// zone.
    #[must_use]
    pub fn rest_of_the_world(methods: Vec<MethodInstance>) -> Self {
        Self {
            id: ZoneId::REST_OF_THE_WORLD,
            name: "Rest of the World".to_owned(),
            methods,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_of_the_world_zone() {
        let zone = ShippingZone::rest_of_the_world(vec![MethodInstance {
            method_type: MethodType::new("flat_rate"),
            instance_id: InstanceId::new(1),
            title: "Flat Rate".to_owned(),
        }]);
        assert_eq!(zone.id, ZoneId::REST_OF_THE_WORLD);
        assert_eq!(zone.name, "Rest of the World");
        assert_eq!(zone.methods.len(), 1);
    }
}
