use std::borrow::Cow;

/// Errors that can occur while exporting documentation.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// A variable required once the gate is open was not provided.
    #[error("Missing required variable {name}{}", format_context(context))]
    MissingVariable { name: &'static str, context: Option<Cow<'static, str>> },

    /// A setting that must carry a value was set to an empty string.
    #[error("Variable {name} must not be empty{}", format_context(context))]
    EmptyValue { name: &'static str, context: Option<Cow<'static, str>> },

    /// Settings could not be assembled from the file and environment layers.
    #[error("Config error{}: {source}", format_context(context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    /// Filesystem failure (e.g., the redirect file could not be written).
    #[error("I/O error{}: {source}", format_context(context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The external program could not be started at all.
    #[error("Failed to execute '{program}'{}: {source}", format_context(context))]
    Spawn { program: String, source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The external program ran and reported failure.
    #[error("Command '{program}' failed with {}{}", format_code(*code), format_context(context))]
    CommandFailed { program: String, code: Option<i32>, context: Option<Cow<'static, str>> },
}

/// Attaches a context label to a failed result.
pub trait PublishErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, PublishError>;
}

impl<T> PublishErrorExt<T> for Result<T, PublishError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                PublishError::MissingVariable { context: c, .. }
                | PublishError::EmptyValue { context: c, .. }
                | PublishError::Config { context: c, .. }
                | PublishError::Io { context: c, .. }
                | PublishError::Spawn { context: c, .. }
                | PublishError::CommandFailed { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> PublishErrorExt<T> for Result<T, std::io::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, PublishError> {
        self.map_err(|source| PublishError::Io { source, context: Some(context.into()) })
    }
}

impl<T> PublishErrorExt<T> for Result<T, config::ConfigError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, PublishError> {
        self.map_err(|source| PublishError::Config { source, context: Some(context.into()) })
    }
}

impl From<std::io::Error> for PublishError {
    #[inline]
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, context: None }
    }
}

impl From<config::ConfigError> for PublishError {
    #[inline]
    fn from(source: config::ConfigError) -> Self {
        Self::Config { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

fn format_code(code: Option<i32>) -> Cow<'static, str> {
    code.map_or(Cow::Borrowed("a signal"), |c| Cow::Owned(format!("exit code {c}")))
}
