use crate::secret::Secret;

/// Authenticated HTTPS remote that receives the pages branch.
#[derive(Debug, Clone)]
pub struct PushTarget {
    host: String,
    token: Secret,
    slug: String,
    branch: String,
}

impl PushTarget {
    pub fn new(
        host: impl Into<String>,
        token: Secret,
        slug: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self { host: host.into(), token, slug: slug.into(), branch: branch.into() }
    }

    /// Remote URL with the token embedded as the userinfo part.
    ///
    /// Token and slug are inserted exactly as given, without escaping.
    #[must_use]
    pub fn url(&self) -> Secret {
        Secret::new(format!("https://{}@{}/{}.git", self.token.expose(), self.host, self.slug))
    }

    /// Loggable form of [`Self::url`].
    #[must_use]
    pub fn redacted_url(&self) -> String {
        format!("https://{}@{}/{}.git", self.token, self.host, self.slug)
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }
}
