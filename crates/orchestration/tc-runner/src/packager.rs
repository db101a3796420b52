//! Maps job outcomes onto responses.

use tc_error::TcError;
use tc_types::{JobFailure, JobResponse, STATUS_FAILED, STATUS_OK, VerificationOutput};

/// Package a completed verifier run: 200 iff it exited with code 0.
pub fn package_output(prefix: &str, output: VerificationOutput) -> JobResponse {
    let status_code = if output.succeeded() {
        STATUS_OK
    } else {
        STATUS_FAILED
    };

    JobResponse {
        status_code,
        prefix: prefix.to_string(),
        result: Some(output),
        error: None,
    }
}

/// Package a job that failed before producing verifier output.
pub fn package_failure(prefix: &str, err: &TcError) -> JobResponse {
    JobResponse {
        status_code: STATUS_FAILED,
        prefix: prefix.to_string(),
        result: None,
        error: Some(JobFailure::from(err)),
    }
}
