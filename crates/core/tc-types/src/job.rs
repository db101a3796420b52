//! Job request and response payloads.

use serde::{Deserialize, Serialize};
use tc_error::{ErrorKind, Result, TcError};

/// Status code for a job whose verifier exited successfully.
pub const STATUS_OK: u16 = 200;

/// Status code for every other outcome.
pub const STATUS_FAILED: u16 = 500;

/// A request to materialize and check one project folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    /// Object store prefix identifying the project folder
    #[serde(alias = "obj_key")]
    pub prefix: String,
}

impl JobRequest {
    /// Create a request for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

/// HTTP gateway envelope carrying the request as a JSON string body.
#[derive(Debug, Deserialize)]
struct GatewayEnvelope {
    body: Option<String>,
}

/// Parse a job request from JSON.
///
/// Accepts a bare request (`{"prefix": "proj1/"}`) or a gateway envelope
/// whose `body` field holds the request as a JSON string.
pub fn parse_job_request(input: &str) -> Result<JobRequest> {
    if let Ok(request) = serde_json::from_str::<JobRequest>(input) {
        return Ok(request);
    }

    let envelope = serde_json::from_str::<GatewayEnvelope>(input)
        .map_err(|e| TcError::Config(format!("Invalid job request: {e}")))?;

    let body = envelope
        .body
        .ok_or_else(|| TcError::Config("Invalid job request: missing prefix".to_string()))?;

    serde_json::from_str::<JobRequest>(&body)
        .map_err(|e| TcError::Config(format!("Invalid job request body: {e}")))
}

/// Captured result of one verifier run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutput {
    /// Exit code, absent when the process was terminated by a signal
    pub exit_code: Option<i32>,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl VerificationOutput {
    /// Whether the verifier reported success.
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Diagnostic attached to responses for jobs that failed before or while
/// running the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFailure {
    /// Failure taxonomy entry
    pub kind: ErrorKind,

    /// Human-readable diagnostic
    pub message: String,

    /// Offending remote key or local path, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offending: Option<String>,
}

impl From<&TcError> for JobFailure {
    fn from(err: &TcError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            offending: err.offending(),
        }
    }
}

/// The response returned for every job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    /// 200 iff the verifier exited successfully, 500 otherwise
    pub status_code: u16,

    /// Prefix of the job this response answers
    pub prefix: String,

    /// Verifier output, present whenever the verifier ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VerificationOutput>,

    /// Internal failure, present whenever the verifier did not run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JobFailure>,
}

impl JobResponse {
    /// Whether the job passed.
    pub fn is_ok(&self) -> bool {
        self.status_code == STATUS_OK
    }
}
