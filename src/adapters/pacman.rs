//! Package database queries through the `pacman` command-line tool.

use crate::domain::ports::PackageSource;
use crate::utils::error::{Result, SnapshotError};
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct PacmanSource {
    binary: String,
}

impl PacmanSource {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Runs one query and returns stdout.
    ///
    /// `empty_failure_ok` covers `pacman -Qm`, which exits 1 with no output
    /// when nothing matches.
    async fn query(&self, flag: &str, empty_failure_ok: bool) -> Result<String> {
        let command = format!("{} {}", self.binary, flag);
        tracing::debug!("Running `{}`", command);

        let output = Command::new(&self.binary)
            .arg(flag)
            .env("LC_ALL", "C")
            .output()
            .await
            .map_err(|e| SnapshotError::ExternalToolFailure {
                command: command.clone(),
                message: format!("failed to start: {}", e),
            })?;

        if !output.status.success() {
            if empty_failure_ok && output.stdout.is_empty() && output.stderr.is_empty() {
                tracing::debug!("`{}` matched nothing", command);
                return Ok(String::new());
            }
            return Err(SnapshotError::ExternalToolFailure {
                command,
                message: format!(
                    "exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| SnapshotError::ExternalToolFailure {
            command,
            message: format!("output is not valid UTF-8: {}", e),
        })
    }
}

impl Default for PacmanSource {
    fn default() -> Self {
        Self::new("pacman")
    }
}

impl PackageSource for PacmanSource {
    async fn explicit_packages(&self) -> Result<String> {
        self.query("-Qe", false).await
    }

    async fn foreign_packages(&self) -> Result<String> {
        self.query("-Qem", true).await
    }

    async fn official_package_names(&self) -> Result<String> {
        self.query("-Slq", false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_external_tool_failure() {
        let source = PacmanSource::new("/nonexistent/bin/pacman");
        let err = source.explicit_packages().await.unwrap_err();

        match err {
            SnapshotError::ExternalToolFailure { command, message } => {
                assert_eq!(command, "/nonexistent/bin/pacman -Qe");
                assert!(message.starts_with("failed to start"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
