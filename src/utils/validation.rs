use crate::utils::error::{Result, SnapshotError};
use std::path::{Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let raw = path.to_string_lossy();

    if raw.is_empty() {
        return Err(SnapshotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if raw.contains('\0') {
        return Err(SnapshotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    if path.is_dir() {
        return Err(SnapshotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path points to a directory, expected a file".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SnapshotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 前後快照不可指向同一檔案，否則每次執行都只會和自己比較
pub fn validate_distinct_paths(previous: &Path, current: &Path) -> Result<()> {
    if normalize(previous) == normalize(current) {
        return Err(SnapshotError::InvalidConfigValueError {
            field: "current".to_string(),
            value: current.display().to_string(),
            reason: "The current snapshot path must differ from the previous snapshot path"
                .to_string(),
        });
    }
    Ok(())
}

/// 將父目錄正規化後再接上檔名；檔案本身可能還不存在
fn normalize(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("current", Path::new("current.json")).is_ok());
        assert!(validate_path("current", Path::new("")).is_err());
        assert!(validate_path("current", Path::new("bad\0name.json")).is_err());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_path("current", dir.path()).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("pacman", "/usr/bin/pacman").is_ok());
        assert!(validate_non_empty_string("pacman", "   ").is_err());
    }

    #[test]
    fn test_validate_distinct_paths() {
        assert!(
            validate_distinct_paths(Path::new("previous.json"), Path::new("current.json")).is_ok()
        );
        assert!(
            validate_distinct_paths(Path::new("same.json"), Path::new("same.json")).is_err()
        );
    }

    #[test]
    fn test_distinct_paths_compares_resolved_locations() {
        assert!(validate_distinct_paths(Path::new("x.json"), Path::new("./x.json")).is_err());

        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let direct = dir.path().join("previous.json");
        let roundabout = dir.path().join("sub").join("..").join("previous.json");
        assert!(validate_distinct_paths(&direct, &roundabout).is_err());
        assert!(validate_distinct_paths(&direct, &dir.path().join("current.json")).is_ok());
    }
}
