//! Postgres-backed host storage reads.
//!
//! The host keeps its shipping configuration in three tables:
//!
//! - `shipping_packages` - published package records (`status = 'publish'`)
//! - `shipping_zones` - explicit zones, ordered by `zone_order`
//! - `shipping_zone_methods` - zone-method associations; `zone_id = 0`
//!   marks methods never assigned to an explicit zone
//!
//! [`PgShippingDirectory::load`] reads all three fresh and produces an
//! owned [`DirectorySnapshot`]; callers build one per settings-page render
//! so nothing here outlives the data it was read from.

use std::collections::HashMap;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use orddd_compat_core::{InstanceId, MethodRef, MethodType, PackageId, ShippingPackage, ShippingZone, ZoneId};

use crate::host::{DirectorySnapshot, MethodRegistry};

/// Errors that can occur while loading a directory snapshot.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[derive(Debug, sqlx::FromRow)]
struct PackageRow {
    id: i64,
    title: String,
    menu_order: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct ZoneRow {
    zone_id: i64,
    zone_name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct ZoneMethodRow {
    zone_id: i64,
    instance_id: i64,
    method_id: String,
}

/// Loader producing directory snapshots from the host's Postgres storage.
pub struct PgShippingDirectory<'a> {
    pool: &'a PgPool,
}

impl<'a> PgShippingDirectory<'a> {
    /// Create a new loader over an existing pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Read the host's shipping configuration and build a snapshot.
    ///
    /// Zone-method rows whose type is missing from `registry` are dropped
    /// here for explicit zones (the settings page cannot label them); zone
    /// id `0` rows are kept raw, the enumerator applies the registry gate
    /// itself.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn load(&self, registry: MethodRegistry) -> Result<DirectorySnapshot, RepositoryError> {
        let packages = sqlx::query_as::<_, PackageRow>(
            r"
            SELECT id, title, menu_order
            FROM shipping_packages
            WHERE status = 'publish'
            ORDER BY menu_order, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let zones = sqlx::query_as::<_, ZoneRow>(
            r"
            SELECT zone_id, zone_name
            FROM shipping_zones
            ORDER BY zone_order, zone_id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let zone_methods = sqlx::query_as::<_, ZoneMethodRow>(
            r"
            SELECT zone_id, instance_id, method_id
            FROM shipping_zone_methods
            WHERE is_enabled
            ORDER BY method_order, instance_id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(
            packages = packages.len(),
            zones = zones.len(),
            zone_methods = zone_methods.len(),
            "loaded shipping directory snapshot"
        );

        Ok(build_snapshot(registry, packages, zones, zone_methods))
    }
}

fn build_snapshot(
    registry: MethodRegistry,
    packages: Vec<PackageRow>,
    zones: Vec<ZoneRow>,
    zone_methods: Vec<ZoneMethodRow>,
) -> DirectorySnapshot {
    let mut refs_by_zone: HashMap<i64, Vec<MethodRef>> = HashMap::new();
    for row in zone_methods {
        refs_by_zone.entry(row.zone_id).or_default().push(MethodRef {
            method_type: MethodType::new(row.method_id),
            instance_id: InstanceId::new(row.instance_id),
        });
    }
    let unassigned = refs_by_zone.remove(&0).unwrap_or_default();

    let built_zones: Vec<ShippingZone> = zones
        .into_iter()
        .map(|row| {
            let methods = refs_by_zone
                .remove(&row.zone_id)
                .unwrap_or_default()
                .iter()
                .filter_map(|method_ref| registry.instantiate(method_ref))
                .collect();
            ShippingZone {
                id: ZoneId::new(row.zone_id),
                name: row.zone_name,
                methods,
            }
        })
        .collect();

    let mut snapshot = DirectorySnapshot::new(registry);
    for row in packages {
        snapshot = snapshot.with_package(ShippingPackage {
            id: PackageId::new(row.id),
            title: row.title,
            menu_order: row.menu_order,
        });
    }
    for zone in built_zones {
        snapshot = snapshot.with_zone(zone);
    }
    for method_ref in unassigned {
        snapshot = snapshot.with_unassigned(method_ref);
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ShippingDirectory;

    #[test]
    fn test_build_snapshot_partitions_zone_zero_rows() {
        let registry = MethodRegistry::with_host_defaults();
        let snapshot = build_snapshot(
            registry,
            vec![PackageRow {
                id: 12,
                title: "Maharashtra".to_owned(),
                menu_order: 0,
            }],
            vec![ZoneRow {
                zone_id: 4,
                zone_name: "India".to_owned(),
            }],
            vec![
                ZoneMethodRow {
                    zone_id: 4,
                    instance_id: 10,
                    method_id: "flat_rate".to_owned(),
                },
                ZoneMethodRow {
                    zone_id: 0,
                    instance_id: 32,
                    method_id: "free_shipping".to_owned(),
                },
            ],
        );

        let zones = snapshot.zones().expect("zones");
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].methods.len(), 1);
        assert_eq!(zones[0].methods[0].instance_id, InstanceId::new(10));

        let unassigned = snapshot.unassigned_method_refs().expect("refs");
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].method_type, MethodType::new("free_shipping"));
    }

    #[test]
    fn test_build_snapshot_drops_unlabelable_zone_methods() {
        let snapshot = build_snapshot(
            MethodRegistry::with_host_defaults(),
            Vec::new(),
            vec![ZoneRow {
                zone_id: 4,
                zone_name: "India".to_owned(),
            }],
            vec![ZoneMethodRow {
                zone_id: 4,
                instance_id: 10,
                method_id: "courier_pigeon".to_owned(),
            }],
        );

        let zones = snapshot.zones().expect("zones");
        assert!(zones[0].methods.is_empty());
    }
}
