//! Runtime reached through its command-line interface (`ollama run ...`)

use super::{truncate_chars, ModelRuntime};
use async_trait::async_trait;
use hamcaller_core::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Longest stderr excerpt carried in an error message
const MAX_STDERR_CHARS: usize = 500;

/// Bound on `probe`, which only lists installed models
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Spawns `<program> run <model> <prompt>` once per call.
///
/// The child is killed when the returned future is dropped, so a caller-side
/// timeout or a disconnected client does not leave the model running.
#[derive(Debug, Clone)]
pub struct CommandRuntime {
    program: PathBuf,
}

impl CommandRuntime {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Path or name of the runtime executable
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, err: std::io::Error) -> Error {
        match err.kind() {
            ErrorKind::NotFound => Error::unavailable(format!(
                "`{}` not found; is the model runtime installed?",
                self.program.display()
            )),
            ErrorKind::PermissionDenied => Error::unavailable(format!(
                "`{}` is not executable",
                self.program.display()
            )),
            _ => Error::Io(err),
        }
    }
}

impl Default for CommandRuntime {
    fn default() -> Self {
        Self::new("ollama")
    }
}

#[async_trait]
impl ModelRuntime for CommandRuntime {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        debug!(program = %self.program.display(), model, "Spawning model runtime");

        let child = self
            .command()
            .arg("run")
            .arg(model)
            .arg(prompt)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = truncate_chars(stderr.trim(), MAX_STDERR_CHARS);
            warn!(status = %output.status, "Model runtime exited with an error");
            return Err(Error::unavailable(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                detail
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::malformed(format!("runtime output is not UTF-8: {}", e)))
    }

    async fn probe(&self) -> Result<()> {
        let child = self
            .command()
            .arg("list")
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let output = tokio::time::timeout(PROBE_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| Error::RuntimeTimeout(PROBE_TIMEOUT))??;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(Error::unavailable(truncate_chars(
                stderr.trim(),
                MAX_STDERR_CHARS,
            )))
        }
    }

    fn name(&self) -> &str {
        "command"
    }
}
