//! # Settings
//!
//! Layered configuration for a documentation export run: an optional TOML
//! file overlaid by environment variables. Only the variables named in
//! [`KEYS`] are read from the environment, matched case-insensitively.
//!
//! The gate comes from the environment alone and is checked before any layer
//! is built, so a closed gate never fails on a bad file or tunable.

use crate::error::{PublishError, PublishErrorExt};
use crate::remote::PushTarget;
use crate::secret::Secret;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Gate variable. Publishing runs only when it is exactly `"true"`.
pub const GATE_VAR: &str = "DOC";
pub(crate) const GATE_VALUE: &str = "true";
pub const CRATE_VAR: &str = "CRATE";
pub const TOKEN_VAR: &str = "TOKEN";
pub const SLUG_VAR: &str = "TRAVIS_REPO_SLUG";
const BRANCH_VAR: &str = "PAGES_BRANCH";
const HOST_VAR: &str = "PAGES_HOST";

/// Every environment variable the settings layer picks up.
pub const KEYS: &[&str] =
    &[GATE_VAR, CRATE_VAR, TOKEN_VAR, SLUG_VAR, "DOC_DIR", BRANCH_VAR, HOST_VAR, "PIP_SUDO"];

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "publish.toml";

pub(crate) const DEFAULT_DOC_DIR: &str = "target/doc";
pub(crate) const DEFAULT_BRANCH: &str = "gh-pages";
pub(crate) const DEFAULT_HOST: &str = "github.com";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Raw `DOC` environment value, compared verbatim. Never read from the file.
    #[serde(skip)]
    pub doc: Option<String>,
    /// Crate whose docs the root redirect points at.
    #[serde(rename = "crate")]
    pub crate_name: Option<String>,
    pub token: Option<Secret>,
    /// `owner/repo` of the push target.
    #[serde(rename = "travis_repo_slug")]
    pub repo_slug: Option<String>,
    pub doc_dir: PathBuf,
    #[serde(rename = "pages_branch")]
    pub branch: String,
    #[serde(rename = "pages_host")]
    pub host: String,
    /// Run the publisher install through `sudo`.
    #[serde(rename = "pip_sudo")]
    pub use_sudo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            doc: None,
            crate_name: None,
            token: None,
            repo_slug: None,
            doc_dir: PathBuf::from(DEFAULT_DOC_DIR),
            branch: DEFAULT_BRANCH.to_owned(),
            host: DEFAULT_HOST.to_owned(),
            use_sudo: true,
        }
    }
}

/// Values needed once the gate is open.
#[derive(Debug, Clone)]
pub struct Release {
    pub crate_name: String,
    pub target: PushTarget,
}

impl Settings {
    /// Loads settings from the process environment, on top of a config file.
    ///
    /// With `explicit` set the file must exist; otherwise
    /// [`DEFAULT_CONFIG_FILE`] under `root` is used when present.
    /// Gated like [`Self::load`].
    ///
    /// # Errors
    /// Returns [`PublishError::Config`] if the gate is open and the file is
    /// missing (explicit path only), malformed, or the merged values do not deserialize.
    pub fn from_env(root: &Path, explicit: Option<&Path>) -> Result<Self, PublishError> {
        let (file, required) = config_file(root, explicit);
        Self::load(&file, required, env_vars())
    }

    /// Like [`Self::from_env`], but reads every layer whatever the gate says.
    ///
    /// # Errors
    /// Same as [`Self::load_ungated`].
    pub fn from_env_ungated(root: &Path, explicit: Option<&Path>) -> Result<Self, PublishError> {
        let (file, required) = config_file(root, explicit);
        Self::load_ungated(&file, required, env_vars())
    }

    /// Builds settings from a config file and an explicit set of variables.
    ///
    /// Variables that are not in [`KEYS`] are ignored. With the gate closed
    /// the file and the other variables are not read at all and the defaults
    /// are returned.
    ///
    /// # Errors
    /// Returns [`PublishError::Config`] when the gate is open and the layers
    /// cannot be merged or deserialized.
    pub fn load<I, K, V>(file: &Path, required: bool, vars: I) -> Result<Self, PublishError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut overrides = collect_overrides(vars);
        let doc = overrides.remove(&GATE_VAR.to_ascii_lowercase());
        if doc.as_deref() != Some(GATE_VALUE) {
            debug!("Gate closed, settings layers not loaded");
            return Ok(Self { doc, ..Self::default() });
        }
        Self::build(file, required, doc, overrides)
    }

    /// Builds settings from every layer without looking at the gate first.
    ///
    /// # Errors
    /// Returns [`PublishError::Config`] when the layers cannot be merged or deserialized.
    pub fn load_ungated<I, K, V>(file: &Path, required: bool, vars: I) -> Result<Self, PublishError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut overrides = collect_overrides(vars);
        let doc = overrides.remove(&GATE_VAR.to_ascii_lowercase());
        Self::build(file, required, doc, overrides)
    }

    fn build(
        file: &Path,
        required: bool,
        doc: Option<String>,
        overrides: config::Map<String, String>,
    ) -> Result<Self, PublishError> {
        debug!("Loading settings from {} ({} overrides)", file.display(), overrides.len());

        let settings = Config::builder()
            .add_source(File::from(file).required(required))
            .add_source(Environment::default().source(Some(overrides)))
            .build()
            .context("Failed to build settings")?
            .try_deserialize::<Self>()
            .context("Failed to deserialize settings")?;

        Ok(Self { doc, ..settings })
    }

    /// Whether the gate variable is exactly `"true"`.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.doc.as_deref() == Some(GATE_VALUE)
    }

    /// Resolves the variables a publishing run cannot do without.
    ///
    /// # Errors
    /// Returns [`PublishError::MissingVariable`] for the first absent variable,
    /// or [`PublishError::EmptyValue`] if the pages branch or host is empty.
    pub fn require(&self) -> Result<Release, PublishError> {
        let crate_name = required(self.crate_name.as_ref(), CRATE_VAR)?.clone();
        let token = required(self.token.as_ref(), TOKEN_VAR)?.clone();
        let slug = required(self.repo_slug.as_ref(), SLUG_VAR)?.clone();
        non_empty(&self.branch, BRANCH_VAR)?;
        non_empty(&self.host, HOST_VAR)?;

        Ok(Release {
            crate_name,
            target: PushTarget::new(self.host.clone(), token, slug, self.branch.clone()),
        })
    }

    /// Resolves the documentation directory against `root` when relative.
    #[must_use]
    pub fn doc_dir_in(&self, root: &Path) -> PathBuf {
        if self.doc_dir.is_absolute() { self.doc_dir.clone() } else { root.join(&self.doc_dir) }
    }
}

fn config_file(root: &Path, explicit: Option<&Path>) -> (PathBuf, bool) {
    explicit.map_or_else(|| (root.join(DEFAULT_CONFIG_FILE), false), |p| (p.to_path_buf(), true))
}

fn env_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

fn collect_overrides<I, K, V>(vars: I) -> config::Map<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    vars.into_iter()
        .filter(|(key, _)| KEYS.iter().any(|known| known.eq_ignore_ascii_case(key.as_ref())))
        .map(|(key, value)| (key.as_ref().to_ascii_lowercase(), value.into()))
        .collect()
}

fn non_empty(value: &str, name: &'static str) -> Result<(), PublishError> {
    if value.is_empty() {
        return Err(PublishError::EmptyValue { name, context: None });
    }
    Ok(())
}

fn required<'a, T>(value: Option<&'a T>, name: &'static str) -> Result<&'a T, PublishError> {
    value.ok_or(PublishError::MissingVariable { name, context: None })
}
