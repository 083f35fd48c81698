use crate::command::{CommandRunner, Invocation};
use crate::error::{PublishError, PublishErrorExt};
use crate::redirect::{self, INDEX_FILE};
use crate::settings::{DEFAULT_BRANCH, Release, Settings};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub(crate) const PUBLISHER_PACKAGE: &str = "ghp-import";

/// Stages of an export, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    BuildDocs,
    WriteRedirect,
    InstallPublisher,
    ImportPages,
    Push,
}

impl Step {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BuildDocs => "build-docs",
            Self::WriteRedirect => "write-redirect",
            Self::InstallPublisher => "install-publisher",
            Self::ImportPages => "import-pages",
            Self::Push => "push",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Run(Invocation),
    WriteRedirect { doc_dir: PathBuf, crate_name: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run(invocation) => invocation.fmt(f),
            Self::WriteRedirect { doc_dir, crate_name } => write!(
                f,
                "write {} -> {crate_name}/index.html",
                doc_dir.join(INDEX_FILE).display()
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlannedStep {
    pub step: Step,
    pub action: Action,
}

/// The fully resolved sequence for one export.
#[derive(Debug, Clone)]
pub struct Plan {
    steps: Vec<PlannedStep>,
    redirect: PathBuf,
    remote: String,
}

impl Plan {
    /// Resolves every step for `release`; relative paths are taken from `root`.
    #[must_use]
    pub fn new(release: &Release, settings: &Settings, root: &Path) -> Self {
        let doc_dir = settings.doc_dir_in(root);
        let target = &release.target;

        let install = if settings.use_sudo {
            Invocation::new("sudo").args(["pip", "install", PUBLISHER_PACKAGE])
        } else {
            Invocation::new("pip").args(["install", PUBLISHER_PACKAGE])
        };

        let mut import = Invocation::new(PUBLISHER_PACKAGE).arg("-n");
        if target.branch() != DEFAULT_BRANCH {
            import = import.args(["-b", target.branch()]);
        }
        import = import.arg(settings.doc_dir.to_string_lossy());

        let push = Invocation::new("git")
            .args(["push", "-fq"])
            .sensitive_arg(target.url(), target.redacted_url())
            .arg(target.branch());

        let steps = vec![
            PlannedStep { step: Step::BuildDocs, action: Action::Run(Invocation::new("cargo").arg("doc")) },
            PlannedStep {
                step: Step::WriteRedirect,
                action: Action::WriteRedirect {
                    doc_dir: doc_dir.clone(),
                    crate_name: release.crate_name.clone(),
                },
            },
            PlannedStep { step: Step::InstallPublisher, action: Action::Run(install) },
            PlannedStep { step: Step::ImportPages, action: Action::Run(import) },
            PlannedStep { step: Step::Push, action: Action::Run(push) },
        ];

        Self { steps, redirect: doc_dir.join(INDEX_FILE), remote: target.redacted_url() }
    }

    #[must_use]
    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Where the redirect file lands.
    #[must_use]
    pub fn redirect_path(&self) -> &Path {
        &self.redirect
    }

    #[must_use]
    pub fn redacted_remote(&self) -> &str {
        &self.remote
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Gate closed; nothing was touched.
    Skipped,
    Published { redirect: PathBuf, remote: String },
}

/// Drives a [`Plan`] through a [`CommandRunner`].
#[derive(Debug)]
pub struct Publisher<R> {
    settings: Settings,
    root: PathBuf,
    runner: R,
}

impl<R: CommandRunner> Publisher<R> {
    pub fn new(settings: Settings, root: impl Into<PathBuf>, runner: R) -> Self {
        Self { settings, root: root.into(), runner }
    }

    /// Resolves the plan, or `None` when the gate is closed.
    ///
    /// # Errors
    /// Returns [`PublishError::MissingVariable`] if the gate is open but a
    /// required variable is absent.
    pub fn plan(&self) -> Result<Option<Plan>, PublishError> {
        if !self.settings.is_enabled() {
            info!("DOC is not \"true\", skipping documentation export");
            return Ok(None);
        }
        let release = self.settings.require()?;
        Ok(Some(Plan::new(&release, &self.settings, &self.root)))
    }

    /// Logs every resolved step without running or writing anything.
    ///
    /// # Errors
    /// Same as [`Self::plan`].
    pub fn dry_run(&self) -> Result<Option<Plan>, PublishError> {
        let plan = self.plan()?;
        if let Some(plan) = &plan {
            for planned in plan.steps() {
                info!("[dry-run] {}: {}", planned.step, planned.action);
            }
        }
        Ok(plan)
    }

    /// Runs the export. Stops at the first failing step.
    ///
    /// # Errors
    /// Returns the failing step's error, labelled with the step name.
    pub fn publish(&self) -> Result<Outcome, PublishError> {
        let Some(plan) = self.plan()? else {
            return Ok(Outcome::Skipped);
        };

        for planned in plan.steps() {
            info!("Running step {}", planned.step);
            self.execute(&planned.action).context(planned.step.label())?;
        }

        info!("Documentation pushed to {}", plan.redacted_remote());
        Ok(Outcome::Published {
            redirect: plan.redirect_path().to_path_buf(),
            remote: plan.redacted_remote().to_owned(),
        })
    }

    fn execute(&self, action: &Action) -> Result<(), PublishError> {
        match action {
            Action::Run(invocation) => {
                debug!("{invocation}");
                self.runner.run(invocation)
            },
            Action::WriteRedirect { doc_dir, crate_name } => {
                redirect::write(doc_dir, crate_name).map(|_| ())
            },
        }
    }
}
