use crate::domain::model::PackageMap;
use crate::utils::error::{Result, SnapshotError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What to do with a listing line that is not `name version`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinePolicy {
    /// Abort the whole parse.
    #[default]
    Fail,
    /// Drop the line and log a warning.
    Skip,
}

/// Parses `pacman -Q` style output into a name -> version map.
///
/// Empty lines are ignored. A line must hold exactly two non-empty fields
/// separated by a single space; anything else is handled per `policy`.
pub fn parse_package_list(text: &str, policy: MalformedLinePolicy) -> Result<PackageMap> {
    let mut packages = PackageMap::new();

    for (index, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        match split_package_line(line) {
            Some((name, version)) => {
                packages.insert(name.to_string(), version.to_string());
            }
            None => match policy {
                MalformedLinePolicy::Fail => {
                    return Err(SnapshotError::MalformedPackageLine {
                        line_number: index + 1,
                        line: line.to_string(),
                    });
                }
                MalformedLinePolicy::Skip => {
                    tracing::warn!("⚠️ Skipping malformed package line {}: {:?}", index + 1, line);
                }
            },
        }
    }

    tracing::debug!("Parsed {} packages", packages.len());
    Ok(packages)
}

fn split_package_line(line: &str) -> Option<(&str, &str)> {
    let (name, version) = line.split_once(' ')?;
    if name.is_empty() || version.is_empty() || version.contains(char::is_whitespace) {
        return None;
    }
    Some((name, version))
}

/// Parses `pacman -Slq` output: one package name per line.
pub fn parse_name_list(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
