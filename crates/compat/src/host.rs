//! Read-only access to the host platform's shipping data.
//!
//! The bridge never owns shipping storage; it reads packages, zones, and
//! zone-method rows through [`ShippingDirectory`] so the enumerator and
//! resolver stay pure functions of their inputs. [`DirectorySnapshot`] is
//! the owned implementation used both as the in-memory fixture and as the
//! result of the Postgres loader in [`crate::db`].

use std::collections::HashMap;

use orddd_compat_core::{InstanceId, MethodInstance, MethodRef, MethodType, ShippingPackage, ShippingZone};

/// Errors surfaced by a directory backend.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the host storage is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Read-only view of the host's shipping configuration.
///
/// Implementations must read fresh data; callers build one directory per
/// settings-page render and discard it afterwards.
pub trait ShippingDirectory {
    /// All published shipping packages, in host order.
    fn published_packages(&self) -> Result<Vec<ShippingPackage>, DirectoryError>;

    /// Exact-title lookup among published packages.
    fn package_by_title(&self, title: &str) -> Result<Option<ShippingPackage>, DirectoryError>;

    /// Whether the host ships zone-based shipping at all. Pre-zone hosts
    /// report `false` and yield empty zone data, which the callers treat
    /// as a degraded-but-valid state.
    fn zones_supported(&self) -> bool;

    /// Explicit shipping zones with their resolved method instances.
    fn zones(&self) -> Result<Vec<ShippingZone>, DirectoryError>;

    /// Zone-method associations with zone id `0`: methods configured
    /// before the host migrated to zone-based shipping.
    fn unassigned_method_refs(&self) -> Result<Vec<MethodRef>, DirectoryError>;

    /// The host's registered shipping-method implementations.
    fn method_registry(&self) -> &MethodRegistry;
}

type MethodFactory = Box<dyn Fn(InstanceId) -> MethodInstance + Send + Sync>;

/// Capability table mapping method types to constructor closures.
///
/// Populated at startup from the host's registered method set; looking a
/// type up by key replaces the host's reflective class instantiation.
/// Unknown types simply fail the lookup and the caller skips the row.
#[derive(Default)]
pub struct MethodRegistry {
    factories: HashMap<MethodType, MethodFactory>,
}

impl MethodRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The method set a stock host registers, with their default display
    /// titles. Hosts with bespoke methods register them on top.
    #[must_use]
    pub fn with_host_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_titled("flat_rate", "Flat Rate");
        registry.register_titled("free_shipping", "Free Shipping");
        registry.register_titled("local_pickup", "Local Pickup");
        registry
    }

    /// Register a constructor closure for `method_type`.
    pub fn register(
        &mut self,
        method_type: impl Into<MethodType>,
        factory: impl Fn(InstanceId) -> MethodInstance + Send + Sync + 'static,
    ) {
        self.factories.insert(method_type.into(), Box::new(factory));
    }

    /// Register a method type whose instances all carry the same display
    /// title; the common case for stock methods.
    pub fn register_titled(&mut self, method_type: impl Into<MethodType>, title: impl Into<String>) {
        let method_type = method_type.into();
        let title = title.into();
        let factory_type = method_type.clone();
        self.register(method_type, move |instance_id| MethodInstance {
            method_type: factory_type.clone(),
            instance_id,
            title: title.clone(),
        });
    }

    /// Whether `method_type` is a registered implementation.
    #[must_use]
    pub fn contains(&self, method_type: &MethodType) -> bool {
        self.factories.contains_key(method_type)
    }

    /// Construct the method instance for a zone-method row, or `None` when
    /// the type is not registered on this host.
    #[must_use]
    pub fn instantiate(&self, method_ref: &MethodRef) -> Option<MethodInstance> {
        self.factories
            .get(&method_ref.method_type)
            .map(|factory| factory(method_ref.instance_id))
    }
}

impl std::fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&str> = self.factories.keys().map(MethodType::as_str).collect();
        types.sort_unstable();
        f.debug_struct("MethodRegistry").field("types", &types).finish()
    }
}

/// Owned, point-in-time view of the host's shipping configuration.
///
/// Built fresh per render, either from fixtures (tests, demos) or by
/// [`crate::db::PgShippingDirectory::load`].
#[derive(Debug)]
pub struct DirectorySnapshot {
    registry: MethodRegistry,
    packages: Vec<ShippingPackage>,
    zones: Vec<ShippingZone>,
    unassigned: Vec<MethodRef>,
    supports_zones: bool,
}

impl DirectorySnapshot {
    /// An empty snapshot for a zone-capable host.
    #[must_use]
    pub fn new(registry: MethodRegistry) -> Self {
        Self {
            registry,
            packages: Vec::new(),
            zones: Vec::new(),
            unassigned: Vec::new(),
            supports_zones: true,
        }
    }

    /// Add a published package.
    #[must_use]
    pub fn with_package(mut self, package: ShippingPackage) -> Self {
        self.packages.push(package);
        self
    }

    /// Add an explicit zone.
    #[must_use]
    pub fn with_zone(mut self, zone: ShippingZone) -> Self {
        self.zones.push(zone);
        self
    }

    /// Add a zone-`0` method association.
    #[must_use]
    pub fn with_unassigned(mut self, method_ref: MethodRef) -> Self {
        self.unassigned.push(method_ref);
        self
    }

    /// Mark the host as pre-zone: zone reads stay empty.
    #[must_use]
    pub fn without_zone_support(mut self) -> Self {
        self.supports_zones = false;
        self
    }
}

impl ShippingDirectory for DirectorySnapshot {
    fn published_packages(&self) -> Result<Vec<ShippingPackage>, DirectoryError> {
        Ok(self.packages.clone())
    }

    fn package_by_title(&self, title: &str) -> Result<Option<ShippingPackage>, DirectoryError> {
        Ok(self
            .packages
            .iter()
            .find(|package| package.title == title)
            .cloned())
    }

    fn zones_supported(&self) -> bool {
        self.supports_zones
    }

    fn zones(&self) -> Result<Vec<ShippingZone>, DirectoryError> {
        if !self.supports_zones {
            return Ok(Vec::new());
        }
        Ok(self.zones.clone())
    }

    fn unassigned_method_refs(&self) -> Result<Vec<MethodRef>, DirectoryError> {
        if !self.supports_zones {
            return Ok(Vec::new());
        }
        Ok(self.unassigned.clone())
    }

    fn method_registry(&self) -> &MethodRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orddd_compat_core::PackageId;

    #[test]
    fn test_registry_instantiates_known_types() {
        let registry = MethodRegistry::with_host_defaults();
        let instance = registry
            .instantiate(&MethodRef {
                method_type: MethodType::new("flat_rate"),
                instance_id: InstanceId::new(32),
            })
            .expect("flat_rate is registered");
        assert_eq!(instance.title, "Flat Rate");
        assert_eq!(instance.instance_id, InstanceId::new(32));
    }

    #[test]
    fn test_registry_skips_unknown_types() {
        let registry = MethodRegistry::with_host_defaults();
        assert!(
            registry
                .instantiate(&MethodRef {
                    method_type: MethodType::new("courier_pigeon"),
                    instance_id: InstanceId::new(1),
                })
                .is_none()
        );
    }

    #[test]
    fn test_snapshot_title_lookup_is_exact() {
        let snapshot = DirectorySnapshot::new(MethodRegistry::new()).with_package(ShippingPackage {
            id: PackageId::new(12),
            title: "Maharashtra".to_owned(),
            menu_order: 0,
        });
        assert!(
            snapshot
                .package_by_title("Maharashtra")
                .expect("lookup")
                .is_some()
        );
        assert!(
            snapshot
                .package_by_title("maharashtra")
                .expect("lookup")
                .is_none()
        );
    }

    #[test]
    fn test_pre_zone_host_yields_empty_zone_data() {
        let snapshot = DirectorySnapshot::new(MethodRegistry::new())
            .with_zone(ShippingZone {
                id: orddd_compat_core::ZoneId::new(1),
                name: "India".to_owned(),
                methods: Vec::new(),
            })
            .with_unassigned(MethodRef {
                method_type: MethodType::new("flat_rate"),
                instance_id: InstanceId::new(1),
            })
            .without_zone_support();

        assert!(!snapshot.zones_supported());
        assert!(snapshot.zones().expect("zones").is_empty());
        assert!(
            snapshot
                .unassigned_method_refs()
                .expect("refs")
                .is_empty()
        );
    }
}
