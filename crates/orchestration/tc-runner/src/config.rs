//! Configuration types for verification jobs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Directory handed to the verifier as its include root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeRoot {
    /// The workspace root every prefix is materialized under
    #[default]
    Workspace,
    /// The materialized project folder (workspace root joined with the prefix)
    Project,
}

/// Configuration for a job run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Entry file path relative to the project folder
    pub entry_file: String,

    /// Include root passed to the verifier
    pub include_root: IncludeRoot,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            entry_file: "main.agda".to_string(),
            include_root: IncludeRoot::Workspace,
        }
    }
}

impl RunnerConfig {
    /// Create a new runner configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry file.
    pub fn with_entry_file(mut self, entry_file: impl Into<String>) -> Self {
        self.entry_file = entry_file.into();
        self
    }

    /// Set the include root mode.
    pub fn with_include_root(mut self, include_root: IncludeRoot) -> Self {
        self.include_root = include_root;
        self
    }
}

/// Configuration for the external verifier command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Program to run
    pub program: String,

    /// Arguments placed before the include flag
    pub args: Vec<String>,

    /// Flag introducing the include root
    pub include_flag: String,

    /// Deadline for one verifier run (none = wait indefinitely)
    pub timeout: Option<Duration>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            program: "agda".to_string(),
            args: Vec::new(),
            include_flag: "-i".to_string(),
            timeout: None,
        }
    }
}

impl VerifierConfig {
    /// Create a configuration for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Add an argument placed before the include flag.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the include flag.
    pub fn with_include_flag(mut self, flag: impl Into<String>) -> Self {
        self.include_flag = flag.into();
        self
    }

    /// Set the deadline for one verifier run.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
