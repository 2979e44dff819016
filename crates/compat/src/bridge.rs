//! Bridge wiring: registers the compatibility handlers on the hook bus.
//!
//! One instance is built at process start and installs three handlers:
//! the shipping-methods filter, the hidden-variables filter, and the
//! front-scripts action. The selected-package resolver is consulted from
//! the latter two.

use std::sync::Arc;

use orddd_compat_core::{MethodOption, ViewMode};
use serde_json::json;

use crate::config::CompatConfig;
use crate::enumerator::{ExclusionList, MethodEnumerator};
use crate::hooks::{HookBus, RenderContext};
use crate::resolver::resolve_selected_package;
use crate::scripts::{self, COMPAT_PARAMS_OBJECT, COMPAT_SCRIPT_HANDLE, ScriptRegistry};

/// Version string appended to the enqueued script URL.
const SCRIPT_VERSION: &str = "1.0";

/// The compatibility bridge between the delivery-date plugin and the
/// shipping-packages plugin.
#[derive(Debug)]
pub struct AdvancedShippingCompat {
    enumerator: MethodEnumerator,
    script_url: String,
}

impl AdvancedShippingCompat {
    /// Build a bridge with explicit settings.
    #[must_use]
    pub fn new(exclusions: ExclusionList, script_url: impl Into<String>) -> Self {
        Self {
            enumerator: MethodEnumerator::new(exclusions),
            script_url: script_url.into(),
        }
    }

    /// Build a bridge from loaded configuration.
    #[must_use]
    pub fn from_config(config: &CompatConfig) -> Self {
        Self::new(config.exclusion_list(), config.script_url.clone())
    }

    /// Install the bridge handlers on `hooks`. Called once at process
    /// start, before the first render.
    pub fn register(self, hooks: &mut HookBus) {
        let bridge = Arc::new(self);

        let compat = Arc::clone(&bridge);
        hooks.on_shipping_methods(move |existing, view, ctx| {
            compat.extend_shipping_methods(existing, view, ctx)
        });

        let compat = Arc::clone(&bridge);
        hooks.on_hidden_variables(move |html, ctx| compat.append_hidden_package_field(html, ctx));

        hooks.on_front_scripts(move |registry, ctx| bridge.enqueue_front_scripts(registry, ctx));
    }

    fn extend_shipping_methods(
        &self,
        existing: Vec<MethodOption>,
        view: ViewMode,
        ctx: &RenderContext<'_>,
    ) -> Vec<MethodOption> {
        self.enumerator.extend(existing, view, ctx.directory)
    }

    /// Append the hidden field naming the package whose delivery settings
    /// the checkout page loads; no package, no field.
    fn append_hidden_package_field(&self, mut html: String, ctx: &RenderContext<'_>) -> String {
        let Some(package) = resolve_selected_package(ctx) else {
            return html;
        };
        match scripts::hidden_package_field(package.id) {
            Ok(fragment) => html.push_str(&fragment),
            Err(error) => {
                tracing::warn!(%error, "failed to render the hidden package field");
            }
        }
        html
    }

    /// Enqueue the checkout script and, when a package resolves, its
    /// runtime parameters.
    fn enqueue_front_scripts(&self, registry: &mut ScriptRegistry, ctx: &RenderContext<'_>) {
        registry.enqueue(COMPAT_SCRIPT_HANDLE, &self.script_url, SCRIPT_VERSION);
        if let Some(package) = resolve_selected_package(ctx) {
            registry.localize(
                COMPAT_SCRIPT_HANDLE,
                COMPAT_PARAMS_OBJECT,
                json!({ "shipping_package_id": package.id }),
            );
        }
    }
}
