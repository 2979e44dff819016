//! Orddd Compat Core - Shared types library.
//!
//! This crate provides common types used across the bridge components:
//! - `compat` - The bridge between the delivery-date plugin and the
//!   shipping-packages plugin
//! - `cli` - Command-line inspection tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no
//! host-platform calls. This keeps it lightweight and allows it to be used
//! anywhere, including from the client-side behavior model.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the composite method key, view modes, and
//!   the shipping package/zone/method records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
