//! Run configuration loaded from `--config`.
//!
//! ```yaml
//! continue_on_fail: true
//! strict: false
//! enforce_depth: true
//! pretty: false
//! ```
//!
//! Every key is optional. Command-line flags can only switch options on.

use std::path::Path;

use anyhow::Result;
use rf_build::{BuildPolicy, UnknownTypes};
use serde::{Deserialize, Serialize};

/// Options shared by every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Report failed records instead of aborting.
    pub continue_on_fail: bool,
    /// Reject unknown kinds and over-deep nesting.
    pub strict: bool,
    /// Reject over-deep nesting while still falling back on unknown kinds.
    pub enforce_depth: bool,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            continue_on_fail: false,
            strict: false,
            enforce_depth: false,
            pretty: true,
        }
    }
}

impl RunConfig {
    /// Load from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let config: Self = crate::read_document(path)?;
                tracing::debug!(path = %path.display(), ?config, "loaded run configuration");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line switches on top of the file values.
    pub fn with_flags(mut self, continue_on_fail: bool, strict: bool) -> Self {
        self.continue_on_fail |= continue_on_fail;
        self.strict |= strict;
        self
    }

    /// The build policy these options select.
    pub fn policy(&self) -> BuildPolicy {
        if self.strict {
            return BuildPolicy::strict();
        }
        BuildPolicy {
            unknown_types: UnknownTypes::Fallback,
            enforce_depth: self.enforce_depth,
        }
    }
}
