use crate::domain::model::Snapshot;
use crate::domain::ports::SnapshotStore;
use crate::utils::error::{Result, SnapshotError};
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Snapshot files on the local filesystem, pretty-printed JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonFileStore;

impl JsonFileStore {
    pub fn new() -> Self {
        Self
    }

    /// 四格縮排，與舊版工具輸出的檔案一致
    pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        snapshot.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

impl SnapshotStore for JsonFileStore {
    async fn load(&self, path: &Path) -> Result<Snapshot> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No snapshot at {}, starting empty", path.display());
                return Ok(Snapshot::empty());
            }
            Err(source) => {
                return Err(SnapshotError::StorageRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let snapshot: Snapshot =
            serde_json::from_slice(&data).map_err(|source| SnapshotError::CorruptSnapshot {
                path: path.to_path_buf(),
                source,
            })?;
        snapshot.check_partition()?;

        tracing::debug!(
            "Loaded {} packages from {}",
            snapshot.len(),
            path.display()
        );
        Ok(snapshot)
    }

    async fn save(&self, path: &Path, snapshot: &Snapshot) -> Result<()> {
        let data = Self::encode(snapshot)?;
        let write_err = |source| SnapshotError::StorageWrite {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_err)?;

        // 先寫暫存檔再 rename，失敗時不會留下半份快照
        let mut builder = tempfile::Builder::new();
        builder.prefix(".pkg-snapshot").suffix(".tmp");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // 0666 經 umask 過濾，和一般建立檔案相同
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder.tempfile_in(parent).map_err(write_err)?;

        // 覆寫既有檔案時保留原本的權限
        match fs::metadata(path) {
            Ok(existing) => tmp
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(write_err)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(write_err(e)),
        }

        tmp.write_all(&data).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}
