//! # Docs Publisher
//!
//! Exports generated API documentation to a `gh-pages` branch from CI.
//!
//! A run is gated on `DOC=true`. When the gate is open it builds the docs,
//! writes a root `index.html` redirect to the crate's page, installs
//! `ghp-import`, imports the doc directory into the pages branch and
//! force-pushes it to `https://${TOKEN}@github.com/${TRAVIS_REPO_SLUG}.git`.
//! Steps run strictly in order and the first failure ends the run.
//!
//! ## Example
//!
//! ```rust,no_run
//! use docs_publisher::{Outcome, Publisher, Settings, SystemRunner};
//!
//! let root = std::env::current_dir()?;
//! let settings = Settings::from_env(&root, None)?;
//! let publisher = Publisher::new(settings, &root, SystemRunner::new(&root));
//!
//! if publisher.publish()? == Outcome::Skipped {
//!     println!("nothing to do");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod command;
mod error;
mod pipeline;
pub mod redirect;
mod remote;
mod secret;
mod settings;

pub use crate::command::{Arg, CommandRunner, Invocation, SystemRunner};
pub use crate::error::{PublishError, PublishErrorExt};
pub use crate::pipeline::{Action, Outcome, Plan, PlannedStep, Publisher, Step};
pub use crate::remote::PushTarget;
pub use crate::secret::Secret;
pub use crate::settings::{
    CRATE_VAR, DEFAULT_CONFIG_FILE, GATE_VAR, KEYS, Release, SLUG_VAR, Settings, TOKEN_VAR,
};
