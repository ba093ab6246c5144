//! Test helpers
//!
//! Tests stand `/bin/sh` in for the sentinel binary. The engine is invoked
//! as `<binary> <source-file>`, so a submission becomes a shell script that
//! prints whatever protocol output a test needs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{Config, EngineConfig};
use crate::engine::EngineInvoker;

pub const SHELL: &str = "/bin/sh";

const OUTPUT_GRACE: Duration = Duration::from_millis(200);

/// Write a (non-executable) shell script and return its path
pub fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("script.sh");
    std::fs::write(&path, body).expect("Failed to write test script");
    path
}

/// Invoker that runs its argument with `/bin/sh`
pub fn shell_invoker(timeout: Duration) -> EngineInvoker {
    EngineInvoker::new(SHELL, timeout, OUTPUT_GRACE)
}

/// Engine configuration using `/bin/sh` and `workspace_dir` for workspaces
pub fn shell_engine_config(workspace_dir: &Path, timeout: Duration) -> EngineConfig {
    EngineConfig {
        binary: PathBuf::from(SHELL),
        timeout,
        output_grace: OUTPUT_GRACE,
        workspace_dir: workspace_dir.to_path_buf(),
        ..EngineConfig::default()
    }
}

/// Full application configuration around [`shell_engine_config`]
pub fn shell_config(workspace_dir: &Path, timeout: Duration) -> Config {
    Config {
        engine: shell_engine_config(workspace_dir, timeout),
        ..Config::default()
    }
}
