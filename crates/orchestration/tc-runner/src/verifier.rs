//! External verifier invocation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tc_error::{Result, TcError};
use tc_traits::Verifier;
use tc_types::VerificationOutput;
use tokio::process::Command;
use tracing::debug;

use crate::config::VerifierConfig;

/// Runs the verifier as a child process and captures its output.
///
/// The command line is `<program> <args...> <include_flag> <include_root> <entry_file>`.
#[derive(Debug, Clone)]
pub struct CommandVerifier {
    config: VerifierConfig,
}

impl CommandVerifier {
    /// Create a verifier from configuration.
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    fn command(&self, include_root: &Path, entry_file: &Path) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .arg(&self.config.include_flag)
            .arg(include_root)
            .arg(entry_file)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Verifier for CommandVerifier {
    async fn verify(&self, include_root: &Path, entry_file: &Path) -> Result<VerificationOutput> {
        debug!(
            program = %self.config.program,
            include_root = %include_root.display(),
            entry_file = %entry_file.display(),
            "Running verifier"
        );

        let mut cmd = self.command(include_root, entry_file);
        let spawned = match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, cmd.output())
                .await
                .map_err(|_| {
                    TcError::Invocation(format!(
                        "'{}' did not finish within {}ms",
                        self.config.program,
                        timeout.as_millis()
                    ))
                })?,
            None => cmd.output().await,
        };

        let output = spawned.map_err(|e| {
            TcError::Invocation(format!("failed to run '{}': {e}", self.config.program))
        })?;

        Ok(VerificationOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
