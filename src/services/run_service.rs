//! Submission run service
//!
//! Drives one submission through workspace → engine → interpreter and
//! guarantees the workspace is gone before the result is returned.

use uuid::Uuid;

use crate::{
    config::EngineConfig,
    constants::SOURCE_FILE_FIELD,
    engine::{interpret, EngineInvoker, Workspace},
    error::{AppError, AppResult},
    models::{Submission, Verdict},
    utils::validate_code_size,
};

/// Run service for business logic
pub struct RunService;

impl RunService {
    /// Fail with an infrastructure error when the engine binary is missing
    pub async fn ensure_engine_available(invoker: &EngineInvoker) -> AppResult<()> {
        if invoker.is_available().await {
            Ok(())
        } else {
            Err(AppError::EngineUnavailable(invoker.binary_display()))
        }
    }

    /// Run a submission and return the engine's verdict.
    ///
    /// The size bound is enforced before anything touches the filesystem.
    pub async fn run(
        engine: &EngineConfig,
        invoker: &EngineInvoker,
        submission: Submission,
    ) -> AppResult<Verdict> {
        let submission_id = Uuid::new_v4();

        if let Err(e) = validate_code_size(&submission.code, engine.max_code_bytes) {
            tracing::info!(
                %submission_id,
                bytes = submission.code_bytes(),
                limit = engine.max_code_bytes,
                "Submission rejected: code too large"
            );
            return Err(e);
        }

        tracing::info!(
            %submission_id,
            bytes = submission.code_bytes(),
            filename = submission.filename.as_deref().unwrap_or_default(),
            "Submission accepted"
        );

        let workspace = Workspace::acquire(&engine.workspace_dir, &submission.code).await?;

        let result = Self::execute(submission_id, invoker, &workspace).await;
        let source_file = submission.source_label(&workspace.file_name());

        workspace.release();

        let mut verdict = match result {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(%submission_id, error = %e, "Submission failed");
                return Err(e);
            }
        };

        if !verdict.annotate(SOURCE_FILE_FIELD, source_file) {
            tracing::debug!(%submission_id, "Engine reported its own source_file, keeping it");
        }

        tracing::info!(%submission_id, fields = verdict.len(), "Submission completed");

        Ok(verdict)
    }

    async fn execute(
        submission_id: Uuid,
        invoker: &EngineInvoker,
        workspace: &Workspace,
    ) -> AppResult<Verdict> {
        let outcome = invoker.run(workspace.path()).await?;

        tracing::info!(
            %submission_id,
            exit_code = ?outcome.exit_code,
            timed_out = outcome.timed_out,
            elapsed_ms = outcome.elapsed_ms,
            "Sentinel finished"
        );
        tracing::debug!(
            %submission_id,
            stdout = %outcome.stdout,
            stderr = %outcome.stderr,
            "Sentinel output"
        );

        interpret(outcome, invoker.timeout())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::test_utils::shell_engine_config;

    fn workspace_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    async fn run(engine: &EngineConfig, code: &str, filename: Option<&str>) -> AppResult<Verdict> {
        let invoker = EngineInvoker::from_config(engine);
        RunService::run(
            engine,
            &invoker,
            Submission::new(code, filename.map(str::to_string)),
        )
        .await
    }

    #[tokio::test]
    async fn test_single_record_gets_workspace_label() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine_config(dir.path(), Duration::from_secs(5));

        let verdict = run(&engine, r#"echo '{"ok":true}'"#, None).await.unwrap();

        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["ok"], json!(true));
        assert_eq!(verdict.len(), 2);
        let label = value["source_file"].as_str().unwrap();
        assert!(label.starts_with("sentinel-") && label.ends_with(".c"));
        assert_eq!(workspace_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_custom_filename_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine_config(dir.path(), Duration::from_secs(5));

        let verdict = run(&engine, r#"echo '{"ok":true}'"#, Some("main.c"))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&verdict).unwrap(),
            json!({"ok": true, "source_file": "main.c"})
        );
    }

    #[tokio::test]
    async fn test_only_last_record_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine_config(dir.path(), Duration::from_secs(5));

        let code = "echo '{\"partial\":1}'\necho '{\"ok\":true}'";
        let verdict = run(&engine, code, Some("two.c")).await.unwrap();

        assert_eq!(
            serde_json::to_value(&verdict).unwrap(),
            json!({"ok": true, "source_file": "two.c"})
        );
    }

    #[tokio::test]
    async fn test_engine_source_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine_config(dir.path(), Duration::from_secs(5));

        let code = r#"echo '{"ok":true,"source_file":"engine.c"}'"#;
        let verdict = run(&engine, code, Some("main.c")).await.unwrap();

        assert_eq!(verdict.get("source_file"), Some(&json!("engine.c")));
    }

    #[tokio::test]
    async fn test_oversized_code_creates_no_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = shell_engine_config(dir.path(), Duration::from_secs(5));
        engine.max_code_bytes = 16;

        let result = run(&engine, "echo 'this is far too long'", None).await;

        assert!(matches!(result, Err(AppError::CodeTooLarge { .. })));
        assert_eq!(workspace_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_workspace_removed_after_engine_failure() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine_config(dir.path(), Duration::from_secs(5));

        let result = run(&engine, "echo 'compile error' >&2; exit 1", None).await;

        match result {
            Err(AppError::EngineFailed {
                returncode, stderr, ..
            }) => {
                assert_eq!(returncode, 1);
                assert_eq!(stderr, "compile error\n");
            }
            other => panic!("expected engine failure, got {:?}", other),
        }
        assert_eq!(workspace_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_workspace_removed_after_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine_config(dir.path(), Duration::from_millis(300));

        let result = run(&engine, "exec sleep 30", None).await;

        assert!(matches!(result, Err(AppError::EngineTimedOut { .. })));
        assert_eq!(workspace_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_workspace_removed_after_protocol_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine_config(dir.path(), Duration::from_secs(5));

        let silent = run(&engine, "true", None).await;
        assert!(matches!(
            silent,
            Err(AppError::InvalidEngineOutput { ref raw }) if raw.is_empty()
        ));

        let garbage = run(&engine, "echo 'not json'", None).await;
        assert!(matches!(
            garbage,
            Err(AppError::InvalidEngineOutput { ref raw }) if raw == "not json"
        ));

        assert_eq!(workspace_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_workspace_removed_when_engine_deletes_it_first() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine_config(dir.path(), Duration::from_secs(5));

        let code = r#"rm -f "$0"; echo '{"ok":true}'"#;
        let verdict = run(&engine, code, None).await.unwrap();

        assert_eq!(verdict.get("ok"), Some(&json!(true)));
        assert_eq!(workspace_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_workspace_holds_submitted_code() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine_config(dir.path(), Duration::from_secs(5));

        // The engine sees the code exactly as submitted.
        let code = "printf '{\"bytes\":%s}' \"$(wc -c < \"$0\" | tr -d ' ')\"";
        let verdict = run(&engine, code, None).await.unwrap();

        assert_eq!(verdict.get("bytes"), Some(&json!(code.len())));
    }

    #[tokio::test]
    async fn test_missing_engine_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = EngineInvoker::new(
            dir.path().join("sentinel"),
            Duration::from_secs(1),
            Duration::from_millis(100),
        );

        assert!(matches!(
            RunService::ensure_engine_available(&invoker).await,
            Err(AppError::EngineUnavailable(_))
        ));
    }
}
