//! Shipping-method enumeration for the custom delivery settings pages.
//!
//! For every (package x zone x method) combination the enumerator appends
//! one labeled entry to the dropdown the delivery-date plugin renders,
//! keyed so the selection resolves back to a concrete (package, method)
//! pair. Methods not yet assigned to an explicit zone are grouped under a
//! synthetic "Rest of the World" zone, except for method types known to be
//! incompatible with the composite-key scheme.

use orddd_compat_core::{MethodInstance, MethodKey, MethodOption, MethodType, ShippingZone, ViewMode};

use crate::host::ShippingDirectory;

/// Separator used in enumerated entry labels.
const LABEL_SEPARATOR: &str = " -> ";

/// Method types excluded from fallback-zone synthesis.
///
/// Two third-party method implementations don't fit the composite-key
/// scheme; they stay out of the synthesized entries unless the exclusion
/// list is reconfigured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionList(Vec<MethodType>);

impl ExclusionList {
    /// Build an exclusion list from explicit method types.
    #[must_use]
    pub fn new(types: Vec<MethodType>) -> Self {
        Self(types)
    }

    /// An empty list: every registered method type participates.
    #[must_use]
    pub fn allow_all() -> Self {
        Self(Vec::new())
    }

    /// Whether `method_type` is excluded.
    #[must_use]
    pub fn contains(&self, method_type: &MethodType) -> bool {
        self.0.contains(method_type)
    }
}

impl Default for ExclusionList {
    /// The two method types the bridge has never supported.
    fn default() -> Self {
        Self(vec![
            MethodType::new("table_rate"),
            MethodType::new("flexible_shipping_ups"),
        ])
    }
}

/// Builds the extended shipping-method list.
#[derive(Debug, Default)]
pub struct MethodEnumerator {
    exclusions: ExclusionList,
}

impl MethodEnumerator {
    /// An enumerator with the given exclusion list.
    #[must_use]
    pub fn new(exclusions: ExclusionList) -> Self {
        Self { exclusions }
    }

    /// Append one entry per (package x zone x method) combination to
    /// `existing` and return it.
    ///
    /// Total over its inputs: empty package sets, pre-zone hosts, and
    /// failed host reads all degrade to fewer (possibly zero) appended
    /// entries, never to an error.
    #[must_use]
    pub fn extend(
        &self,
        existing: Vec<MethodOption>,
        view: ViewMode,
        directory: &dyn ShippingDirectory,
    ) -> Vec<MethodOption> {
        let packages = match directory.published_packages() {
            Ok(packages) => packages,
            Err(error) => {
                tracing::warn!(%error, "failed to read shipping packages; leaving dropdown unchanged");
                return existing;
            }
        };
        if packages.is_empty() {
            return existing;
        }

        let mut zones = Vec::new();
        if directory.zones_supported() {
            zones = directory.zones().unwrap_or_else(|error| {
                tracing::warn!(%error, "failed to read shipping zones; continuing without them");
                Vec::new()
            });
            if let Some(fallback) = self.fallback_zone(directory) {
                zones.push(fallback);
            }
        }

        let mut methods = existing;
        for package in &packages {
            for zone in &zones {
                for method in &zone.methods {
                    let title = [
                        package.title.as_str(),
                        zone.name.as_str(),
                        method.title.as_str(),
                    ]
                    .join(LABEL_SEPARATOR);
                    let key = MethodKey::new(
                        method.method_type.clone(),
                        method.instance_id,
                        package.id,
                    );
                    methods.push(MethodOption::for_view(view, title, key.to_string()));
                }
            }
        }
        methods
    }

    /// Synthesize the "Rest of the World" zone from zone-`0` method rows,
    /// keeping only types the host registers and the exclusion list
    /// allows. `None` when nothing survives.
    fn fallback_zone(&self, directory: &dyn ShippingDirectory) -> Option<ShippingZone> {
        let refs = directory.unassigned_method_refs().unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to read unassigned zone methods; skipping fallback zone");
            Vec::new()
        });

        let registry = directory.method_registry();
        let methods: Vec<MethodInstance> = refs
            .iter()
            .filter_map(|method_ref| {
                let Some(method) = registry.instantiate(method_ref) else {
                    tracing::debug!(
                        method_type = %method_ref.method_type,
                        "zone-0 method type not registered on this host; skipping"
                    );
                    return None;
                };
                if self.exclusions.contains(&method.method_type) {
                    tracing::debug!(
                        method_type = %method.method_type,
                        "method type excluded from fallback zone"
                    );
                    return None;
                }
                Some(method)
            })
            .collect();

        if methods.is_empty() {
            None
        } else {
            Some(ShippingZone::rest_of_the_world(methods))
        }
    }
}
