//! Front-end script registration and HTML fragments.
//!
//! Mirrors the host platform's enqueue/localize pair: scripts are
//! registered under a handle, optionally carry one runtime parameter
//! object, and render as an inline parameter `<script>` immediately
//! followed by the `src` tag. The hidden form field carrying the selected
//! package id is rendered here too.

use askama::Template;
use orddd_compat_core::PackageId;

/// Handle the compatibility script registers under.
pub const COMPAT_SCRIPT_HANDLE: &str = "orddd-advanced-shipping-compatibility";

/// Name of the runtime parameter object injected into the page.
pub const COMPAT_PARAMS_OBJECT: &str = "orddd_advanced_shipping_compatibility_params";

/// Name and id of the hidden field carrying the selected package id.
pub const PACKAGE_FIELD_NAME: &str = "orddd_shipping_package_to_load";

/// Errors rendering HTML fragments.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template rendering failed.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// A runtime parameter object attached to an enqueued script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptParams {
    /// JavaScript identifier the object is assigned to.
    pub object_name: String,
    /// The parameter payload.
    pub data: serde_json::Value,
}

/// One registered front-end script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnqueuedScript {
    pub handle: String,
    pub src: String,
    pub version: String,
    pub params: Option<ScriptParams>,
}

/// Ordered front-end script registrations for one page render.
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    scripts: Vec<EnqueuedScript>,
}

impl ScriptRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script under `handle`. A handle already registered is
    /// left untouched (first registration wins).
    pub fn enqueue(&mut self, handle: &str, src: &str, version: &str) {
        if self.get(handle).is_some() {
            tracing::debug!(handle, "script already enqueued");
            return;
        }
        self.scripts.push(EnqueuedScript {
            handle: handle.to_owned(),
            src: src.to_owned(),
            version: version.to_owned(),
            params: None,
        });
    }

    /// Attach a runtime parameter object to a previously enqueued script.
    /// Returns `false` when the handle is unknown.
    pub fn localize(&mut self, handle: &str, object_name: &str, data: serde_json::Value) -> bool {
        let Some(script) = self.scripts.iter_mut().find(|script| script.handle == handle) else {
            tracing::debug!(handle, "cannot localize a script that was never enqueued");
            return false;
        };
        script.params = Some(ScriptParams {
            object_name: object_name.to_owned(),
            data,
        });
        true
    }

    /// The registration for `handle`, if any.
    #[must_use]
    pub fn get(&self, handle: &str) -> Option<&EnqueuedScript> {
        self.scripts.iter().find(|script| script.handle == handle)
    }

    /// All registrations, in enqueue order.
    #[must_use]
    pub fn scripts(&self) -> &[EnqueuedScript] {
        &self.scripts
    }

    /// Render the script tags for the page footer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if template rendering fails.
    pub fn render(&self) -> Result<String, RenderError> {
        let template = ScriptTagsTemplate {
            scripts: &self.scripts,
        };
        Ok(template.render()?)
    }
}

#[derive(Template)]
#[template(path = "script_tags.html")]
struct ScriptTagsTemplate<'a> {
    scripts: &'a [EnqueuedScript],
}

#[derive(Template)]
#[template(path = "hidden_package_field.html")]
struct HiddenPackageFieldTemplate {
    package_id: PackageId,
}

/// Render the hidden form field naming the package whose delivery settings
/// the checkout page should load.
///
/// # Errors
///
/// Returns [`RenderError::Template`] if template rendering fails.
pub fn hidden_package_field(package_id: PackageId) -> Result<String, RenderError> {
    let template = HiddenPackageFieldTemplate { package_id };
    Ok(template.render()?)
}
