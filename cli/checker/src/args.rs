//! CLI argument definitions for tc-check.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tc_cli_common::LogLevel;

/// Materialize a project tree from S3 and type-check it.
///
/// Clears the workspace, reproduces every object under the prefix beneath
/// it, runs the verifier on the project's entry file and prints one JSON
/// response per job to stdout.
///
/// ## Examples
///
/// Check one project:
///   tc-check -b logic-bucket --prefix proj1/
///
/// Answer a stream of JSON requests, one per line:
///   echo '{"prefix":"proj1/"}' | tc-check -b logic-bucket
///
/// Against LocalStack:
///   tc-check -b logic-bucket --s3-endpoint http://localhost:4566 --prefix proj1/
#[derive(Parser, Debug)]
#[command(name = "tc-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Job Options ===
    /// Prefix of the project to check (reads JSON requests from stdin when absent)
    #[arg(long)]
    pub prefix: Option<String>,

    // === S3 Configuration ===
    /// S3 bucket name
    #[arg(short, long, env = "TC_S3_BUCKET")]
    pub bucket: String,

    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "TC_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// AWS access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    pub access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Per-request S3 timeout in seconds (0 = none)
    #[arg(long, env = "TC_S3_TIMEOUT_SECS", default_value = "30")]
    pub s3_timeout_secs: u64,

    // === Workspace Options ===
    /// Local directory projects are materialized under (cleared before every job)
    #[arg(short, long, env = "TC_WORKSPACE", default_value = "/tmp/treecheck")]
    pub workspace: PathBuf,

    /// Maximum concurrent downloads (must be >= 1)
    #[arg(long, default_value = "1", value_parser = parse_positive_usize)]
    pub concurrency: usize,

    // === Verifier Options ===
    /// Verifier program
    #[arg(long, env = "TC_VERIFIER", default_value = "agda")]
    pub verifier: String,

    /// Extra argument passed to the verifier before the include flag (repeatable)
    #[arg(long = "verifier-arg")]
    pub verifier_args: Vec<String>,

    /// Flag introducing the include root
    #[arg(long, default_value = "-i", allow_hyphen_values = true)]
    pub include_flag: String,

    /// Entry file, relative to the project folder
    #[arg(long, env = "TC_ENTRY_FILE", default_value = "main.agda")]
    pub entry_file: String,

    /// Directory passed as the include root
    #[arg(long, value_enum, default_value = "workspace")]
    pub include_root: IncludeRootArg,

    /// Verifier deadline in seconds (0 = none)
    #[arg(long, default_value = "0")]
    pub timeout_secs: u64,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Include root argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IncludeRootArg {
    /// The workspace root
    Workspace,
    /// The materialized project folder
    Project,
}

impl From<IncludeRootArg> for tc_runner::IncludeRoot {
    fn from(arg: IncludeRootArg) -> Self {
        match arg {
            IncludeRootArg::Workspace => tc_runner::IncludeRoot::Workspace,
            IncludeRootArg::Project => tc_runner::IncludeRoot::Project,
        }
    }
}

/// Parse a positive usize (>= 1).
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_job() {
        let cli = Cli::try_parse_from([
            "tc-check",
            "-b",
            "logic-bucket",
            "--prefix",
            "proj1/",
            "--concurrency",
            "4",
            "--include-root",
            "project",
        ])
        .unwrap();

        assert_eq!(cli.bucket, "logic-bucket");
        assert_eq!(cli.prefix.as_deref(), Some("proj1/"));
        assert_eq!(cli.concurrency, 4);
        assert_eq!(cli.include_flag, "-i");
        assert_eq!(cli.s3_timeout_secs, 30);
        assert!(matches!(cli.include_root, IncludeRootArg::Project));
    }

    #[test]
    fn test_concurrency_must_be_positive() {
        let result = Cli::try_parse_from(["tc-check", "-b", "b", "--concurrency", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_positive_usize() {
        assert_eq!(parse_positive_usize("3"), Ok(3));
        assert!(parse_positive_usize("0").is_err());
        assert!(parse_positive_usize("abc").is_err());
    }
}
