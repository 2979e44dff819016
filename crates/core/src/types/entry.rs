//! The enumerated-entry shapes and the view mode that selects between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which settings page the enumeration is rendered on.
///
/// The editable list and the read-only list carry the same data under
/// different wire field names, so the caller picks the shape up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Add / Edit Custom Delivery Settings page.
    #[default]
    EditSettings,
    /// Read-only listing of saved settings.
    ViewSettings,
}

/// Error parsing a view mode from its wire name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid view mode: {0}")]
pub struct ViewModeError(pub String);

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EditSettings => f.write_str("edit_settings"),
            Self::ViewSettings => f.write_str("view_settings"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = ViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edit_settings" => Ok(Self::EditSettings),
            "view_settings" => Ok(Self::ViewSettings),
            other => Err(ViewModeError(other.to_owned())),
        }
    }
}

/// One entry in the shipping-methods dropdown.
///
/// The two variants serialize to the exact wire shapes the delivery-date
/// plugin consumes; the field names are compatibility-relevant and must not
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodOption {
    /// Shape rendered on the editable settings page.
    Edit {
        title: String,
        method_key: String,
    },
    /// Shape rendered on the read-only settings page.
    View {
        #[serde(rename = "shipping_default_zone_title")]
        title: String,
        #[serde(rename = "shipping_default_zone_id")]
        method_key: String,
    },
}

impl MethodOption {
    /// Build an entry in the shape selected by `view`.
    #[must_use]
    pub fn for_view(view: ViewMode, title: String, method_key: String) -> Self {
        match view {
            ViewMode::EditSettings => Self::Edit { title, method_key },
            ViewMode::ViewSettings => Self::View { title, method_key },
        }
    }

    /// The display label, regardless of shape.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Edit { title, .. } | Self::View { title, .. } => title,
        }
    }

    /// The addressable key, regardless of shape.
    #[must_use]
    pub fn method_key(&self) -> &str {
        match self {
            Self::Edit { method_key, .. } | Self::View { method_key, .. } => method_key,
        }
    }
}
