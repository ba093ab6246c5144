//! Bounded invocation of the sentinel engine

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};

use crate::config::EngineConfig;
use crate::error::{AppError, AppResult};

/// Raw result of one engine run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Exit code; a signal death is reported as the negated signal number.
    /// `None` when the engine was killed for exceeding the time limit.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
    pub elapsed_ms: u64,
}

impl ExecutionOutcome {
    /// Exited on its own with status 0
    pub fn succeeded(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Launches the engine as `<binary> <source-file>`
#[derive(Debug, Clone)]
pub struct EngineInvoker {
    binary: PathBuf,
    timeout: Duration,
    output_grace: Duration,
}

impl EngineInvoker {
    /// Create a new invoker
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration, output_grace: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
            output_grace,
        }
    }

    /// Build an invoker from the engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.binary.clone(), config.timeout, config.output_grace)
    }

    /// Configured wall-clock limit
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the engine binary exists on disk
    pub async fn is_available(&self) -> bool {
        tokio::fs::try_exists(&self.binary).await.unwrap_or(false)
    }

    /// Binary path as shown in messages
    pub fn binary_display(&self) -> String {
        self.binary.display().to_string()
    }

    /// Run the engine against `source`.
    ///
    /// A non-zero exit is not an error here; it is carried in the outcome.
    /// On timeout the child is killed and the outcome is marked `timed_out`
    /// with whatever output had been captured so far.
    pub async fn run(&self, source: &Path) -> AppResult<ExecutionOutcome> {
        let mut child = Command::new(&self.binary)
            .arg(source)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::EngineSpawn(e.to_string()))?;

        // Drain both pipes concurrently so a chatty engine can't block on a full pipe.
        let stdout_reader = tokio::spawn(read_stream(child.stdout.take()));
        let stderr_reader = tokio::spawn(read_stream(child.stderr.take()));

        let start = Instant::now();

        let (exit_code, timed_out) = match timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) => (Some(exit_code(status)), false),
            Ok(Err(e)) => {
                stdout_reader.abort();
                stderr_reader.abort();
                return Err(AppError::Internal(
                    anyhow::Error::new(e).context("Failed to wait for sentinel"),
                ));
            }
            Err(_) => {
                if let Err(e) = child.kill().await {
                    tracing::warn!(error = %e, "Failed to kill timed out sentinel");
                }
                (None, true)
            }
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;

        let stdout = self.collect(stdout_reader).await;
        let stderr = self.collect(stderr_reader).await;

        Ok(ExecutionOutcome {
            exit_code,
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            timed_out,
            elapsed_ms,
        })
    }

    /// Wait for a pipe reader, giving up after the grace period.
    ///
    /// A descendant of the engine can keep the pipe open after the engine
    /// itself is gone; its output is not worth holding the request for.
    async fn collect(&self, mut reader: JoinHandle<Vec<u8>>) -> Vec<u8> {
        match timeout(self.output_grace, &mut reader).await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Sentinel output reader failed");
                Vec::new()
            }
            Err(_) => {
                reader.abort();
                tracing::warn!("Sentinel output still open after exit, discarding");
                Vec::new()
            }
        }
    }
}

async fn read_stream<R>(stream: Option<R>) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        if let Err(e) = stream.read_to_end(&mut buf).await {
            tracing::debug!(error = %e, "Error reading sentinel output");
        }
    }
    buf
}

fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    status.code().unwrap_or(-1)
}
