//! Sentinel output protocol
//!
//! On success the engine prints one JSON object per job, one per line. The
//! last non-empty line is the authoritative result; anything before it is
//! discarded unexamined.

use crate::error::{AppError, AppResult};
use crate::models::Verdict;

use super::invoker::ExecutionOutcome;

/// Turn a finished engine run into a verdict or a classified error.
///
/// `timeout` is only used to describe a timed-out run.
pub fn interpret(outcome: ExecutionOutcome, timeout: std::time::Duration) -> AppResult<Verdict> {
    if outcome.timed_out {
        return Err(AppError::EngineTimedOut {
            timeout,
            stdout: outcome.stdout,
            stderr: outcome.stderr,
        });
    }

    match outcome.exit_code {
        Some(0) => {}
        code => {
            return Err(AppError::EngineFailed {
                returncode: code.unwrap_or(-1),
                stdout: outcome.stdout,
                stderr: outcome.stderr,
            });
        }
    }

    let line = last_record(&outcome.stdout).unwrap_or_default();

    Verdict::parse(line).ok_or_else(|| AppError::InvalidEngineOutput {
        raw: line.to_string(),
    })
}

/// Last line that is not blank, as the engine wrote it
pub fn last_record(stdout: &str) -> Option<&str> {
    stdout.lines().rev().find(|line| !line.trim().is_empty())
}
