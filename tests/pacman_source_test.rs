#![cfg(unix)]

use anyhow::Result;
use pkg_snapshot::core::PackageSource;
use pkg_snapshot::{PacmanSource, SnapshotError};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_fake_pacman(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body))?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

/// 所有會執行假 pacman 腳本的情境放在同一個測試裡依序跑，
/// 避免並行測試在寫檔時 fork 造成 ETXTBSY
#[tokio::test]
async fn test_pacman_source_against_fake_binary() -> Result<()> {
    let temp_dir = TempDir::new()?;

    // 正常輸出
    let healthy = write_fake_pacman(
        temp_dir.path(),
        "pacman-healthy",
        r#"case "$1" in
  -Qe) printf 'vim 9.0\nyay 1.2\n' ;;
  -Qem) printf 'yay 1.2\n' ;;
  -Slq) printf 'vim\ngit\n' ;;
  *) echo "unexpected $1" >&2; exit 64 ;;
esac"#,
    )?;
    let source = PacmanSource::new(healthy.to_string_lossy());
    assert_eq!(source.explicit_packages().await?, "vim 9.0\nyay 1.2\n");
    assert_eq!(source.foreign_packages().await?, "yay 1.2\n");
    assert_eq!(source.official_package_names().await?, "vim\ngit\n");

    // -Qem 沒有符合的套件時 pacman 以 1 結束且沒有輸出
    let no_foreign = write_fake_pacman(
        temp_dir.path(),
        "pacman-no-foreign",
        r#"case "$1" in
  -Qe) printf 'vim 9.0\n' ;;
  *) exit 1 ;;
esac"#,
    )?;
    let source = PacmanSource::new(no_foreign.to_string_lossy());
    assert_eq!(source.foreign_packages().await?, "");
    // 同樣的情況在其他查詢仍然是錯誤
    assert!(source.official_package_names().await.is_err());

    // 有 stderr 的失敗
    let locked = write_fake_pacman(
        temp_dir.path(),
        "pacman-locked",
        "echo 'error: could not lock database' >&2\nexit 1",
    )?;
    let source = PacmanSource::new(locked.to_string_lossy());
    match source.foreign_packages().await {
        Err(SnapshotError::ExternalToolFailure { command, message }) => {
            assert!(command.ends_with("pacman-locked -Qem"));
            assert!(message.contains("could not lock database"));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    // 非 UTF-8 輸出
    let binary = write_fake_pacman(temp_dir.path(), "pacman-binary", r"printf 'vim \377\n'")?;
    let source = PacmanSource::new(binary.to_string_lossy());
    assert!(matches!(
        source.explicit_packages().await,
        Err(SnapshotError::ExternalToolFailure { .. })
    ));

    Ok(())
}
