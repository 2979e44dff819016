//! Print the extended shipping-methods dropdown.

use orddd_compat_core::ViewMode;

use orddd_compat::{AdvancedShippingCompat, HookBus, RenderContext};

use super::CommandError;

/// Run the full hook chain against the host database and print every
/// enumerated entry.
///
/// # Errors
///
/// Returns an error if configuration or the database reads fail.
pub async fn list(view: ViewMode) -> Result<(), CommandError> {
    let (config, snapshot) = super::load_snapshot().await?;

    let mut hooks = HookBus::new();
    AdvancedShippingCompat::from_config(&config).register(&mut hooks);

    let ctx = RenderContext {
        directory: &snapshot,
        hooks: &hooks,
    };
    let entries = hooks.apply_shipping_methods(Vec::new(), view, &ctx);

    tracing::info!(count = entries.len(), "enumerated shipping methods");

    #[allow(clippy::print_stdout)]
    for entry in &entries {
        println!("{}  {}", entry.method_key(), entry.title());
    }

    Ok(())
}
