//! Core types for the shipping-packages bridge.
//!
//! This module provides type-safe wrappers for the domain concepts shared
//! by the enumerator, the resolver, and the client-side behavior model.

pub mod entry;
pub mod id;
pub mod method;
pub mod shipping;

pub use entry::{MethodOption, ViewMode, ViewModeError};
pub use id::*;
pub use method::{MethodKey, MethodKeyError, MethodType};
pub use shipping::{MethodInstance, MethodRef, ShippingPackage, ShippingZone};
