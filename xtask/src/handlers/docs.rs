use crate::services::utils::resolve_root;
use anyhow::{Context, Result};
use docs_publisher::{CRATE_VAR, Outcome, Publisher, Settings, SystemRunner, redirect};
use std::path::Path;
use tracing::info;

/// Publishes the workspace docs to the pages branch.
///
/// # Result
/// Returns `Ok(())` when the export is skipped by the gate or completes.
///
/// # Errors
/// Returns an error if settings cannot be loaded, a required variable is
/// missing while the gate is open, or any step fails.
pub fn publish_docs(config: Option<&Path>, root: Option<&Path>, dry_run: bool) -> Result<()> {
    let root = resolve_root(root)?;
    let settings = Settings::from_env(&root, config)?;
    let publisher = Publisher::new(settings, &root, SystemRunner::new(&root));

    if dry_run {
        if publisher.dry_run()?.is_some() {
            info!("Dry run complete, nothing was executed");
        }
        return Ok(());
    }

    match publisher.publish()? {
        Outcome::Skipped => {},
        Outcome::Published { redirect, remote } => {
            println!("📚 Documentation published to {remote}");
            println!("🔗 Redirect: {}", redirect.display());
        },
    }

    Ok(())
}

/// Writes the root redirect without building or pushing anything.
///
/// # Errors
/// Returns an error if no crate name is available or the file cannot be written.
pub fn write_redirect(crate_name: Option<&str>, root: Option<&Path>) -> Result<()> {
    let root = resolve_root(root)?;
    let settings = Settings::from_env_ungated(&root, None)?;

    let crate_name = crate_name
        .map(ToOwned::to_owned)
        .or(settings.crate_name.clone())
        .with_context(|| format!("No crate given; pass --crate or set {CRATE_VAR}"))?;

    let path = redirect::write(&settings.doc_dir_in(&root), &crate_name)?;
    println!("🔗 Redirect written: {}", path.display());

    Ok(())
}
