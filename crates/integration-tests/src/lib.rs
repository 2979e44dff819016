//! Integration tests for the delivery-date shipping-packages bridge.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p orddd-compat-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `settings_page` - Full hook-chain enumeration scenarios
//! - `checkout_page` - Hidden fields, script parameters, and the
//!   cache-invalidation behavior
//!
//! The scenarios wire a [`orddd_compat::HookBus`] with the bridge
//! registered and run it against in-memory directory snapshots; no
//! database or browser is involved.

#![cfg_attr(not(test), forbid(unsafe_code))]

use orddd_compat_core::{InstanceId, MethodRef, MethodType, PackageId, ShippingPackage};

use orddd_compat::{DirectorySnapshot, MethodRegistry};

/// A host with one published package "Maharashtra" and a single zone-0
/// flat-rate method, the canonical scenario from the plugin's own docs.
#[must_use]
pub fn maharashtra_host() -> DirectorySnapshot {
    DirectorySnapshot::new(MethodRegistry::with_host_defaults())
        .with_package(ShippingPackage {
            id: PackageId::new(12),
            title: "Maharashtra".to_owned(),
            menu_order: 0,
        })
        .with_unassigned(MethodRef {
            method_type: MethodType::new("flat_rate"),
            instance_id: InstanceId::new(32),
        })
}
