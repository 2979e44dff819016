//! Selected-package resolution.
//!
//! The checkout page surfaces one package's custom delivery settings by
//! default, and the browser script scopes its listener to that package's
//! method selector. A site integrator can name the package through the
//! [`crate::hooks::SHIPPING_PACKAGE_TO_LOAD`] point; otherwise the first
//! published package by manual sort order wins.

use orddd_compat_core::ShippingPackage;

use crate::hooks::RenderContext;

/// Resolve the shipping package whose delivery settings load by default.
///
/// A registered title that matches no published package yields `None`
/// without falling back to sort order; an unregistered or empty title
/// falls through to the lowest `menu_order`. Host read failures degrade
/// to `None`.
#[must_use]
pub fn resolve_selected_package(ctx: &RenderContext<'_>) -> Option<ShippingPackage> {
    if ctx.hooks.has_package_to_load() {
        let title = ctx.hooks.apply_package_to_load();
        if !title.is_empty() {
            return match ctx.directory.package_by_title(&title) {
                Ok(package) => {
                    if package.is_none() {
                        tracing::debug!(%title, "no published package matches the requested title");
                    }
                    package
                }
                Err(error) => {
                    tracing::warn!(%error, %title, "failed to look up shipping package by title");
                    None
                }
            };
        }
    }

    match ctx.directory.published_packages() {
        Ok(packages) => packages.into_iter().min_by_key(|package| package.menu_order),
        Err(error) => {
            tracing::warn!(%error, "failed to read shipping packages");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orddd_compat_core::PackageId;

    use crate::hooks::HookBus;
    use crate::host::{DirectorySnapshot, MethodRegistry};

    fn package(id: i64, title: &str, menu_order: i64) -> ShippingPackage {
        ShippingPackage {
            id: PackageId::new(id),
            title: title.to_owned(),
            menu_order,
        }
    }

    fn directory() -> DirectorySnapshot {
        DirectorySnapshot::new(MethodRegistry::new())
            .with_package(package(1, "Karnataka", 2))
            .with_package(package(2, "Maharashtra", 1))
    }

    #[test]
    fn test_falls_back_to_lowest_menu_order() {
        let hooks = HookBus::new();
        let directory = directory();
        let ctx = RenderContext {
            directory: &directory,
            hooks: &hooks,
        };
        let package = resolve_selected_package(&ctx).expect("a package resolves");
        assert_eq!(package.title, "Maharashtra");
    }

    #[test]
    fn test_menu_order_tie_keeps_host_order() {
        let hooks = HookBus::new();
        let directory = DirectorySnapshot::new(MethodRegistry::new())
            .with_package(package(1, "Karnataka", 1))
            .with_package(package(2, "Maharashtra", 1));
        let ctx = RenderContext {
            directory: &directory,
            hooks: &hooks,
        };
        let package = resolve_selected_package(&ctx).expect("a package resolves");
        assert_eq!(package.title, "Karnataka");
    }

    #[test]
    fn test_registered_title_wins_over_menu_order() {
        let mut hooks = HookBus::new();
        hooks.on_package_to_load(|_| "Karnataka".to_owned());
        let directory = directory();
        let ctx = RenderContext {
            directory: &directory,
            hooks: &hooks,
        };
        let package = resolve_selected_package(&ctx).expect("a package resolves");
        assert_eq!(package.title, "Karnataka");
    }

    #[test]
    fn test_unmatched_title_does_not_fall_back() {
        let mut hooks = HookBus::new();
        hooks.on_package_to_load(|_| "Gujarat".to_owned());
        let directory = directory();
        let ctx = RenderContext {
            directory: &directory,
            hooks: &hooks,
        };
        assert!(resolve_selected_package(&ctx).is_none());
    }

    #[test]
    fn test_empty_title_falls_back() {
        let mut hooks = HookBus::new();
        hooks.on_package_to_load(|value| value);
        let directory = directory();
        let ctx = RenderContext {
            directory: &directory,
            hooks: &hooks,
        };
        let package = resolve_selected_package(&ctx).expect("a package resolves");
        assert_eq!(package.title, "Maharashtra");
    }

    #[test]
    fn test_no_packages_resolves_to_none() {
        let hooks = HookBus::new();
        let directory = DirectorySnapshot::new(MethodRegistry::new());
        let ctx = RenderContext {
            directory: &directory,
            hooks: &hooks,
        };
        assert!(resolve_selected_package(&ctx).is_none());
    }
}
