//! Client-side cache invalidation on shipping-method change.
//!
//! The checkout page caches delivery-date state in the browser's local
//! key-value storage. When the shopper changes the shipping method for the
//! selected package, those entries describe a method that is no longer
//! chosen and must be dropped before the delivery session refreshes.
//!
//! The behavior is modeled here as a small state machine with injected
//! collaborators so the shipped browser script
//! (`assets/orddd-advanced-shipping-compatibility.js`) has a testable
//! reference implementation.

use orddd_compat_core::PackageId;

/// Id of the toggle control reporting whether shipping-based delivery
/// settings are enabled.
pub const DELIVERY_TOGGLE_ID: &str = "orddd_enable_shipping_based_delivery";

/// Toggle value meaning shipping-based delivery settings are enabled.
pub const DELIVERY_ENABLED: &str = "on";

/// Cache entries cleared on a method change, in clearing order.
///
/// Exact literal names; the delivery-date plugin reads them back.
pub const CLEARED_CACHE_KEYS: [&str; 4] = [
    "orddd_storage_next_time",
    "e_deliverydate_session",
    "h_deliverydate_session",
    "time_slot",
];

/// The browser's local key-value storage, as far as this module needs it.
pub trait ClientStorage {
    /// Remove one entry; removing a missing key is a no-op.
    fn remove(&mut self, key: &str);
}

/// The delivery-date plugin's session refresh entry point.
///
/// Fire-and-forget: failures inside the refresh are not observed here.
pub trait DeliverySession {
    fn refresh(&mut self);
}

/// Invalidator state; always [`Idle`](InvalidatorState::Idle) between
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidatorState {
    #[default]
    Idle,
    Invalidating,
}

/// A change event on a shipping-method selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodChangeEvent {
    /// Package whose selector fired.
    pub package_id: PackageId,
    /// Current value of the [`DELIVERY_TOGGLE_ID`] control.
    pub delivery_toggle: String,
}

/// Clears stale delivery-date caches when the shipping method changes for
/// one specific package.
#[derive(Debug)]
pub struct CacheInvalidator {
    package_id: PackageId,
    state: InvalidatorState,
}

impl CacheInvalidator {
    /// Scope the invalidator to the selector of `package_id`; the id is
    /// injected at script-load time by the front-end loader.
    #[must_use]
    pub const fn new(package_id: PackageId) -> Self {
        Self {
            package_id,
            state: InvalidatorState::Idle,
        }
    }

    /// Current state; observable for diagnostics.
    #[must_use]
    pub const fn state(&self) -> InvalidatorState {
        self.state
    }

    /// Handle one change event.
    ///
    /// Events for other packages are ignored outright. For a matching
    /// event the four cache entries are cleared when shipping-based
    /// delivery is enabled, and the delivery session refresh runs
    /// unconditionally. Runs to completion; the page context delivers
    /// events one at a time.
    pub fn on_method_change(
        &mut self,
        event: &MethodChangeEvent,
        storage: &mut dyn ClientStorage,
        session: &mut dyn DeliverySession,
    ) {
        if event.package_id != self.package_id {
            tracing::debug!(
                package_id = %event.package_id,
                scoped_to = %self.package_id,
                "method change for another package; ignoring"
            );
            return;
        }

        self.state = InvalidatorState::Invalidating;
        if event.delivery_toggle == DELIVERY_ENABLED {
            for key in CLEARED_CACHE_KEYS {
                storage.remove(key);
            }
            tracing::debug!(package_id = %self.package_id, "cleared delivery-date caches");
        }
        session.refresh();
        self.state = InvalidatorState::Idle;
    }
}
