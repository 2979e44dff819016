//! Checkout-page scenarios: hidden fields, script parameters, and the
//! cache-invalidation behavior driven by the injected package id.

use orddd_compat_core::PackageId;

use orddd_compat::invalidator::{
    CacheInvalidator, ClientStorage, DeliverySession, MethodChangeEvent,
};
use orddd_compat::scripts::{COMPAT_PARAMS_OBJECT, COMPAT_SCRIPT_HANDLE, ScriptRegistry};
use orddd_compat::{AdvancedShippingCompat, ExclusionList, HookBus, RenderContext};
use orddd_compat_integration_tests::maharashtra_host;

#[derive(Default)]
struct FakeLocalStorage {
    removed: Vec<String>,
}

impl ClientStorage for FakeLocalStorage {
    fn remove(&mut self, key: &str) {
        self.removed.push(key.to_owned());
    }
}

#[derive(Default)]
struct FakeDeliverySession {
    refreshes: usize,
}

impl DeliverySession for FakeDeliverySession {
    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

fn registered_bus() -> HookBus {
    let mut hooks = HookBus::new();
    AdvancedShippingCompat::new(
        ExclusionList::default(),
        "/assets/orddd-advanced-shipping-compatibility.js",
    )
    .register(&mut hooks);
    hooks
}

/// The page render injects the resolved package id; the invalidator picks
/// it back up from the localized parameters.
fn injected_package_id(hooks: &HookBus, ctx: &RenderContext<'_>) -> PackageId {
    let mut registry = ScriptRegistry::new();
    hooks.run_front_scripts(&mut registry, ctx);
    let script = registry.get(COMPAT_SCRIPT_HANDLE).expect("script enqueued");
    let params = script.params.as_ref().expect("params localized");
    assert_eq!(params.object_name, COMPAT_PARAMS_OBJECT);
    let id = params.data["shipping_package_id"]
        .as_i64()
        .expect("integral package id");
    PackageId::new(id)
}

#[test]
fn test_hidden_field_and_params_name_the_same_package() {
    let hooks = registered_bus();
    let directory = maharashtra_host();
    let ctx = RenderContext {
        directory: &directory,
        hooks: &hooks,
    };

    let html = hooks.apply_hidden_variables(String::new(), &ctx);
    assert!(html.contains("name=\"orddd_shipping_package_to_load\""));
    assert!(html.contains("value=\"12\""));

    assert_eq!(injected_package_id(&hooks, &ctx), PackageId::new(12));
}

#[test]
fn test_method_change_with_delivery_enabled_clears_the_caches() {
    let hooks = registered_bus();
    let directory = maharashtra_host();
    let ctx = RenderContext {
        directory: &directory,
        hooks: &hooks,
    };

    let mut invalidator = CacheInvalidator::new(injected_package_id(&hooks, &ctx));
    let mut storage = FakeLocalStorage::default();
    let mut session = FakeDeliverySession::default();

    invalidator.on_method_change(
        &MethodChangeEvent {
            package_id: PackageId::new(12),
            delivery_toggle: "on".to_owned(),
        },
        &mut storage,
        &mut session,
    );

    assert_eq!(
        storage.removed,
        vec![
            "orddd_storage_next_time",
            "e_deliverydate_session",
            "h_deliverydate_session",
            "time_slot",
        ]
    );
    assert_eq!(session.refreshes, 1);
}

#[test]
fn test_method_change_with_delivery_disabled_still_refreshes() {
    let hooks = registered_bus();
    let directory = maharashtra_host();
    let ctx = RenderContext {
        directory: &directory,
        hooks: &hooks,
    };

    let mut invalidator = CacheInvalidator::new(injected_package_id(&hooks, &ctx));
    let mut storage = FakeLocalStorage::default();
    let mut session = FakeDeliverySession::default();

    invalidator.on_method_change(
        &MethodChangeEvent {
            package_id: PackageId::new(12),
            delivery_toggle: String::new(),
        },
        &mut storage,
        &mut session,
    );

    assert!(storage.removed.is_empty());
    assert_eq!(session.refreshes, 1);
}

#[test]
fn test_integrator_override_scopes_the_invalidator() {
    let mut hooks = HookBus::new();
    AdvancedShippingCompat::new(
        ExclusionList::default(),
        "/assets/orddd-advanced-shipping-compatibility.js",
    )
    .register(&mut hooks);
    hooks.on_package_to_load(|_| "Karnataka".to_owned());

    let directory = maharashtra_host().with_package(orddd_compat_core::ShippingPackage {
        id: PackageId::new(31),
        title: "Karnataka".to_owned(),
        menu_order: 5,
    });
    let ctx = RenderContext {
        directory: &directory,
        hooks: &hooks,
    };

    // Despite Maharashtra's lower menu order, the registered title wins.
    assert_eq!(injected_package_id(&hooks, &ctx), PackageId::new(31));

    // A change on the Maharashtra selector is out of scope now.
    let mut invalidator = CacheInvalidator::new(PackageId::new(31));
    let mut storage = FakeLocalStorage::default();
    let mut session = FakeDeliverySession::default();
    invalidator.on_method_change(
        &MethodChangeEvent {
            package_id: PackageId::new(12),
            delivery_toggle: "on".to_owned(),
        },
        &mut storage,
        &mut session,
    );
    assert!(storage.removed.is_empty());
    assert_eq!(session.refreshes, 0);
}
