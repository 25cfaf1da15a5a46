use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Malformed package line {line_number}: {line:?}")]
    MalformedPackageLine { line_number: usize, line: String },

    #[error("External tool failure running `{command}`: {message}")]
    ExternalToolFailure { command: String, message: String },

    #[error("Failed to read snapshot {}: {source}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write snapshot {}: {source}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot {} is not valid JSON: {source}", .path.display())]
    CorruptSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Package '{name}' appears in both the official and third-party buckets")]
    BucketOverlap { name: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    ExternalTool,
    Storage,
    Consistency,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SnapshotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SnapshotError::MalformedPackageLine { .. } => ErrorCategory::Input,
            SnapshotError::ExternalToolFailure { .. } => ErrorCategory::ExternalTool,
            SnapshotError::StorageRead { .. }
            | SnapshotError::StorageWrite { .. }
            | SnapshotError::CorruptSnapshot { .. }
            | SnapshotError::SerializationError(_) => ErrorCategory::Storage,
            SnapshotError::BucketOverlap { .. } => ErrorCategory::Consistency,
            SnapshotError::ConfigError { .. } | SnapshotError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 使用者可自行修正後重跑
            SnapshotError::ConfigError { .. }
            | SnapshotError::InvalidConfigValueError { .. }
            | SnapshotError::CorruptSnapshot { .. }
            | SnapshotError::BucketOverlap { .. } => ErrorSeverity::Medium,
            SnapshotError::MalformedPackageLine { .. } | SnapshotError::SerializationError(_) => {
                ErrorSeverity::High
            }
            // 系統層級：工具缺失或磁碟不可寫
            SnapshotError::ExternalToolFailure { .. }
            | SnapshotError::StorageRead { .. }
            | SnapshotError::StorageWrite { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SnapshotError::MalformedPackageLine { .. } => {
                "Check the package tool output by hand, or rerun with --skip-malformed".to_string()
            }
            SnapshotError::ExternalToolFailure { .. } => {
                "Make sure pacman is installed, on PATH (or set --pacman) and its database is initialized"
                    .to_string()
            }
            SnapshotError::StorageRead { path, .. } => {
                format!("Check that {} is readable", path.display())
            }
            SnapshotError::StorageWrite { path, .. } => {
                format!(
                    "Check that the directory containing {} exists and is writable",
                    path.display()
                )
            }
            SnapshotError::CorruptSnapshot { path, .. } => format!(
                "Fix or remove {}; a missing previous snapshot is treated as empty",
                path.display()
            ),
            SnapshotError::BucketOverlap { .. } => {
                "Remove the duplicated entry from one bucket of the snapshot file".to_string()
            }
            SnapshotError::SerializationError(_) => {
                "Report this as a bug together with the snapshot contents".to_string()
            }
            SnapshotError::ConfigError { .. } | SnapshotError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SnapshotError::MalformedPackageLine { line_number, line } => format!(
                "Unexpected package listing format on line {}: {:?}",
                line_number, line
            ),
            SnapshotError::ExternalToolFailure { command, .. } => {
                format!("Could not query the package database (`{}`)", command)
            }
            SnapshotError::StorageRead { path, .. } => {
                format!("Could not read previous snapshot {}", path.display())
            }
            SnapshotError::StorageWrite { path, source } => {
                format!("Could not save snapshot to {}: {}", path.display(), source)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
