//! Bridge between the delivery-date plugin and the shipping-packages plugin.
//!
//! The host platform renders a "Custom Delivery Settings" page with a
//! shipping-methods dropdown, and a checkout page that loads a small
//! browser script. This crate plugs into both through the host's
//! extension points:
//!
//! - [`enumerator`] extends the dropdown with one entry per
//!   (package x zone x method) combination,
//! - [`resolver`] picks the shipping package whose delivery settings are
//!   surfaced by default,
//! - [`scripts`] registers the checkout script and its runtime parameters
//!   and renders the hidden form field carrying the selected package id,
//! - [`invalidator`] models the checkout script's cache-clearing behavior
//!   so it can be tested without a browser.
//!
//! Host data (packages, zones, zone-method rows) is reached through the
//! read-only [`host::ShippingDirectory`] interface; [`db`] provides the
//! Postgres-backed snapshot loader.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bridge;
pub mod config;
pub mod db;
pub mod enumerator;
pub mod hooks;
pub mod host;
pub mod invalidator;
pub mod resolver;
pub mod scripts;

pub use bridge::AdvancedShippingCompat;
pub use config::{CompatConfig, ConfigError};
pub use enumerator::{ExclusionList, MethodEnumerator};
pub use hooks::{HookBus, RenderContext};
pub use host::{DirectoryError, DirectorySnapshot, MethodRegistry, ShippingDirectory};
pub use resolver::resolve_selected_package;
pub use scripts::ScriptRegistry;
