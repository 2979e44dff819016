//! Shipping-method identifiers and the composite method key.
//!
//! A configured shipping method is addressed by `(method type, instance id)`
//! on the host platform. The bridge extends that address with the shipping
//! package it was enumerated for, producing the composite key
//! `"<method_type>:<instance_id>:<package_id>"` that the delivery-date
//! plugin later resolves back to a concrete (package, method) pair.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{InstanceId, PackageId};

/// A shipping-method implementation identifier (e.g. `"flat_rate"`).
///
/// Compared verbatim and case-sensitively; the host owns the namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodType(String);

impl MethodType {
    /// Create a method type from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MethodType {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for MethodType {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Errors produced when parsing a composite method key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MethodKeyError {
    /// The key did not contain exactly two `:` separators.
    #[error("expected <method_type>:<instance_id>:<package_id>, got {0:?}")]
    MalformedKey(String),

    /// The method-type segment was empty.
    #[error("empty method type in key {0:?}")]
    EmptyMethodType(String),

    /// The instance-id segment was not an integer.
    #[error("invalid instance id {0:?}")]
    InvalidInstanceId(String),

    /// The package-id segment was not an integer.
    #[error("invalid package id {0:?}")]
    InvalidPackageId(String),
}

/// The composite key addressing one enumerated entry.
///
/// Renders as `"<method_type>:<instance_id>:<package_id>"` and parses back
/// losslessly; the two numeric segments reject non-integer input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    pub method_type: MethodType,
    pub instance_id: InstanceId,
    pub package_id: PackageId,
}

impl MethodKey {
    /// Build a key from its three parts.
    #[must_use]
    pub const fn new(method_type: MethodType, instance_id: InstanceId, package_id: PackageId) -> Self {
        Self {
            method_type,
            instance_id,
            package_id,
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.method_type, self.instance_id, self.package_id
        )
    }
}

impl FromStr for MethodKey {
    type Err = MethodKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.splitn(3, ':');
        let (Some(method_type), Some(instance), Some(package)) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(MethodKeyError::MalformedKey(s.to_owned()));
        };

        if method_type.is_empty() {
            return Err(MethodKeyError::EmptyMethodType(s.to_owned()));
        }
        // A third ':' would have been folded into the package segment by splitn.
        if package.contains(':') {
            return Err(MethodKeyError::MalformedKey(s.to_owned()));
        }

        let instance_id = instance
            .parse::<InstanceId>()
            .map_err(|_| MethodKeyError::InvalidInstanceId(instance.to_owned()))?;
        let package_id = package
            .parse::<PackageId>()
            .map_err(|_| MethodKeyError::InvalidPackageId(package.to_owned()))?;

        Ok(Self {
            method_type: MethodType::new(method_type),
            instance_id,
            package_id,
        })
    }
}

impl Serialize for MethodKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MethodKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
