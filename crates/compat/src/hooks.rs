//! Extension-point registry.
//!
//! The host platform dispatches named extension points; this registry
//! models them explicitly as ordered handler lists populated at process
//! start. Filters thread a value through every handler in registration
//! order; actions are invoked for their side effects on a shared value.
//!
//! Handlers receive a [`RenderContext`] carrying the injected read-only
//! host directory and the bus itself, so a handler can consult other
//! points (the selected-package resolver checks
//! [`SHIPPING_PACKAGE_TO_LOAD`] this way).

use orddd_compat_core::{MethodOption, ViewMode};

use crate::host::ShippingDirectory;
use crate::scripts::ScriptRegistry;

/// Filter extending the shipping-methods dropdown on the custom delivery
/// settings pages.
pub const CUSTOM_SETTING_SHIPPING_METHODS: &str = "orddd_custom_setting_shipping_methods";

/// Filter appending hidden form fields to the checkout page.
pub const HIDDEN_VARIABLES: &str = "orddd_hidden_variables";

/// Action registering front-end scripts for the checkout page.
pub const INCLUDE_FRONT_SCRIPTS: &str = "orddd_include_front_scripts";

/// Filter through which a site integrator names the shipping package whose
/// delivery settings load by default. Optional; rarely registered.
pub const SHIPPING_PACKAGE_TO_LOAD: &str = "orddd_shipping_package_to_load";

/// Per-render context handed to every handler.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Read-only view of the host's packages, zones, and methods, read
    /// fresh for this render.
    pub directory: &'a dyn ShippingDirectory,
    /// The bus dispatching the current point.
    pub hooks: &'a HookBus,
}

type ShippingMethodsHandler =
    Box<dyn Fn(Vec<MethodOption>, ViewMode, &RenderContext<'_>) -> Vec<MethodOption> + Send + Sync>;
type HiddenVariablesHandler = Box<dyn Fn(String, &RenderContext<'_>) -> String + Send + Sync>;
type FrontScriptsHandler = Box<dyn Fn(&mut ScriptRegistry, &RenderContext<'_>) + Send + Sync>;
type PackageTitleHandler = Box<dyn Fn(String) -> String + Send + Sync>;

/// Ordered handler lists for the four extension points.
#[derive(Default)]
pub struct HookBus {
    shipping_methods: Vec<ShippingMethodsHandler>,
    hidden_variables: Vec<HiddenVariablesHandler>,
    front_scripts: Vec<FrontScriptsHandler>,
    package_to_load: Vec<PackageTitleHandler>,
}

impl HookBus {
    /// An empty bus; handlers are registered at process start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler on [`CUSTOM_SETTING_SHIPPING_METHODS`].
    pub fn on_shipping_methods(
        &mut self,
        handler: impl Fn(Vec<MethodOption>, ViewMode, &RenderContext<'_>) -> Vec<MethodOption>
        + Send
        + Sync
        + 'static,
    ) {
        self.shipping_methods.push(Box::new(handler));
    }

    /// Register a handler on [`HIDDEN_VARIABLES`].
    pub fn on_hidden_variables(
        &mut self,
        handler: impl Fn(String, &RenderContext<'_>) -> String + Send + Sync + 'static,
    ) {
        self.hidden_variables.push(Box::new(handler));
    }

    /// Register a handler on [`INCLUDE_FRONT_SCRIPTS`].
    pub fn on_front_scripts(
        &mut self,
        handler: impl Fn(&mut ScriptRegistry, &RenderContext<'_>) + Send + Sync + 'static,
    ) {
        self.front_scripts.push(Box::new(handler));
    }

    /// Register a handler on [`SHIPPING_PACKAGE_TO_LOAD`].
    pub fn on_package_to_load(
        &mut self,
        handler: impl Fn(String) -> String + Send + Sync + 'static,
    ) {
        self.package_to_load.push(Box::new(handler));
    }

    /// Thread the method list through every registered handler.
    #[must_use]
    pub fn apply_shipping_methods(
        &self,
        methods: Vec<MethodOption>,
        view: ViewMode,
        ctx: &RenderContext<'_>,
    ) -> Vec<MethodOption> {
        tracing::debug!(
            point = CUSTOM_SETTING_SHIPPING_METHODS,
            handlers = self.shipping_methods.len(),
            %view,
            "applying filter"
        );
        self.shipping_methods
            .iter()
            .fold(methods, |value, handler| handler(value, view, ctx))
    }

    /// Thread the hidden-variables HTML through every registered handler.
    #[must_use]
    pub fn apply_hidden_variables(&self, html: String, ctx: &RenderContext<'_>) -> String {
        tracing::debug!(
            point = HIDDEN_VARIABLES,
            handlers = self.hidden_variables.len(),
            "applying filter"
        );
        self.hidden_variables
            .iter()
            .fold(html, |value, handler| handler(value, ctx))
    }

    /// Run every registered front-scripts handler against the registry.
    pub fn run_front_scripts(&self, scripts: &mut ScriptRegistry, ctx: &RenderContext<'_>) {
        tracing::debug!(
            point = INCLUDE_FRONT_SCRIPTS,
            handlers = self.front_scripts.len(),
            "running action"
        );
        for handler in &self.front_scripts {
            handler(scripts, ctx);
        }
    }

    /// Whether any handler is registered on [`SHIPPING_PACKAGE_TO_LOAD`].
    #[must_use]
    pub fn has_package_to_load(&self) -> bool {
        !self.package_to_load.is_empty()
    }

    /// Thread an empty title through the [`SHIPPING_PACKAGE_TO_LOAD`]
    /// handlers; an empty result means no preference was expressed.
    #[must_use]
    pub fn apply_package_to_load(&self) -> String {
        self.package_to_load
            .iter()
            .fold(String::new(), |value, handler| handler(value))
    }
}

impl std::fmt::Debug for HookBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookBus")
            .field(CUSTOM_SETTING_SHIPPING_METHODS, &self.shipping_methods.len())
            .field(HIDDEN_VARIABLES, &self.hidden_variables.len())
            .field(INCLUDE_FRONT_SCRIPTS, &self.front_scripts.len())
            .field(SHIPPING_PACKAGE_TO_LOAD, &self.package_to_load.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DirectorySnapshot, MethodRegistry};

    fn empty_directory() -> DirectorySnapshot {
        DirectorySnapshot::new(MethodRegistry::new())
    }

    #[test]
    fn test_filters_apply_in_registration_order() {
        let mut bus = HookBus::new();
        bus.on_hidden_variables(|html, _| html + "a");
        bus.on_hidden_variables(|html, _| html + "b");

        let directory = empty_directory();
        let inner = HookBus::new();
        let ctx = RenderContext {
            directory: &directory,
            hooks: &inner,
        };
        assert_eq!(bus.apply_hidden_variables(String::new(), &ctx), "ab");
    }

    #[test]
    fn test_package_to_load_defaults_to_empty() {
        let bus = HookBus::new();
        assert!(!bus.has_package_to_load());
        assert_eq!(bus.apply_package_to_load(), "");
    }

    #[test]
    fn test_package_to_load_last_handler_wins() {
        let mut bus = HookBus::new();
        bus.on_package_to_load(|_| "Maharashtra".to_owned());
        bus.on_package_to_load(|_| "Karnataka".to_owned());
        assert!(bus.has_package_to_load());
        assert_eq!(bus.apply_package_to_load(), "Karnataka");
    }

    #[test]
    fn test_unregistered_points_pass_values_through() {
        let bus = HookBus::new();
        let directory = empty_directory();
        let ctx = RenderContext {
            directory: &directory,
            hooks: &bus,
        };
        let methods = bus.apply_shipping_methods(
            vec![MethodOption::Edit {
                title: "Flat Rate".to_owned(),
                method_key: "flat_rate:1".to_owned(),
            }],
            ViewMode::EditSettings,
            &ctx,
        );
        assert_eq!(methods.len(), 1);
    }
}
