use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Returns the directory an export runs in.
///
/// # Errors
/// Returns an error if no root is given and the current directory cannot be read.
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    root.map_or_else(
        || std::env::current_dir().context("Could not determine the current directory"),
        |path| Ok(path.to_path_buf()),
    )
}
