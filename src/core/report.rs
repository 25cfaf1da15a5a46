use crate::domain::model::{PackageMap, SnapshotDiff};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 將差異輸出成給使用者看的報表
pub fn render(diff: &SnapshotDiff, format: OutputFormat, show_version_changes: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(diff, show_version_changes)),
        OutputFormat::Json => render_json(diff, show_version_changes),
    }
}

fn render_text(diff: &SnapshotDiff, show_version_changes: bool) -> String {
    let mut out = String::new();

    out.push_str("Newly installed packages:\n");
    push_section(&mut out, &diff.added);

    out.push_str("\nRemoved packages:\n");
    push_section(&mut out, &diff.removed);

    if show_version_changes {
        out.push_str("\nVersion changes:\n");
        if diff.version_changed.is_empty() {
            out.push_str("  (none)\n");
        }
        for (name, change) in &diff.version_changed {
            let _ = writeln!(out, "  {} {} -> {}", name, change.previous, change.current);
        }
    }

    out
}

fn push_section(out: &mut String, packages: &PackageMap) {
    if packages.is_empty() {
        out.push_str("  (none)\n");
        return;
    }
    for (name, version) in packages {
        let _ = writeln!(out, "  {} {}", name, version);
    }
}

fn render_json(diff: &SnapshotDiff, show_version_changes: bool) -> Result<String> {
    let mut report = serde_json::json!({
        "added": diff.added,
        "removed": diff.removed,
    });
    if show_version_changes {
        report["version_changed"] = serde_json::to_value(&diff.version_changed)?;
    }
    Ok(serde_json::to_string_pretty(&report)?)
}
