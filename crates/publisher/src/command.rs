use crate::error::PublishError;
use crate::secret::Secret;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// A single command-line argument.
#[derive(Debug, Clone)]
pub enum Arg {
    Plain(String),
    /// Argument carrying a credential; `shown` is what logs get.
    Sensitive { value: Secret, shown: String },
}

impl Arg {
    /// The value handed to the process.
    #[must_use]
    pub fn expose(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Sensitive { value, .. } => value.expose(),
        }
    }
}

/// External program plus its arguments.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: String,
    args: Vec<Arg>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(Arg::Plain(arg.into()));
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|a| Arg::Plain(a.into())));
        self
    }

    #[must_use]
    pub fn sensitive_arg(mut self, value: Secret, shown: impl Into<String>) -> Self {
        self.args.push(Arg::Sensitive { value, shown: shown.into() });
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments as the process will receive them, credentials included.
    #[must_use]
    pub fn exposed_args(&self) -> Vec<&str> {
        self.args.iter().map(Arg::expose).collect()
    }
}

/// Redacted, shell-like rendering.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            match arg {
                Arg::Plain(value) => write!(f, " {value}")?,
                Arg::Sensitive { shown, .. } => write!(f, " {shown}")?,
            }
        }
        Ok(())
    }
}

/// Executes external programs on behalf of the pipeline.
pub trait CommandRunner {
    /// Runs `invocation` to completion.
    ///
    /// # Errors
    /// Returns an error if the program cannot be started or exits unsuccessfully.
    fn run(&self, invocation: &Invocation) -> Result<(), PublishError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<(), PublishError> {
        (**self).run(invocation)
    }
}

/// Runs commands as child processes of the current one, inheriting stdio.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    working_dir: PathBuf,
}

impl SystemRunner {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self { working_dir: working_dir.into() }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), PublishError> {
        debug!("Executing: {invocation}");

        let status = Command::new(invocation.program())
            .args(invocation.exposed_args())
            .current_dir(&self.working_dir)
            .status()
            .map_err(|source| PublishError::Spawn {
                program: invocation.program().to_owned(),
                source,
                context: None,
            })?;

        if !status.success() {
            return Err(PublishError::CommandFailed {
                program: invocation.program().to_owned(),
                code: status.code(),
                context: None,
            });
        }
        Ok(())
    }
}
