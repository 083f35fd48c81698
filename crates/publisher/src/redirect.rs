//! Root `index.html` that forwards visitors to the crate's own docs page.

use crate::error::{PublishError, PublishErrorExt};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const INDEX_FILE: &str = "index.html";

/// Returns the single-line meta-refresh document, newline terminated.
#[must_use]
pub fn render(crate_name: &str) -> String {
    format!("<meta http-equiv=refresh content=0;url={crate_name}/index.html>\n")
}

/// Writes the redirect into `doc_dir`, creating the directory if needed.
///
/// # Errors
/// Returns [`PublishError::Io`] if the directory or file cannot be written.
pub fn write(doc_dir: &Path, crate_name: &str) -> Result<PathBuf, PublishError> {
    fs::create_dir_all(doc_dir)
        .context(format!("Failed to create directory: {}", doc_dir.display()))?;

    let path = doc_dir.join(INDEX_FILE);
    fs::write(&path, render(crate_name))
        .context(format!("Failed to write redirect: {}", path.display()))?;

    debug!("Wrote redirect {}", path.display());
    Ok(path)
}
