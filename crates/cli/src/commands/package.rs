//! Print the resolved selected package.

use orddd_compat::{HookBus, RenderContext, resolve_selected_package};

use super::CommandError;

/// Print the package whose custom delivery settings load by default, or a
/// notice when none resolves.
///
/// # Errors
///
/// Returns an error if configuration or the database reads fail.
pub async fn show() -> Result<(), CommandError> {
    let (_config, snapshot) = super::load_snapshot().await?;

    let hooks = HookBus::new();
    let ctx = RenderContext {
        directory: &snapshot,
        hooks: &hooks,
    };

    #[allow(clippy::print_stdout)]
    match resolve_selected_package(&ctx) {
        Some(package) => println!("{}  {}", package.id, package.title),
        None => println!("no published shipping packages"),
    }

    Ok(())
}
