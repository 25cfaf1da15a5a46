use crate::domain::model::{Bucket, PackageMap, Snapshot, SnapshotDiff, VersionChange};
use crate::utils::error::{Result, SnapshotError};

/// Compares two snapshots bucket by bucket.
///
/// Membership is tracked per bucket, so a package that moved between buckets
/// shows up as removed and added. A version change inside the same bucket is
/// neither; it is only recorded in `version_changed`.
pub fn diff_snapshots(previous: &Snapshot, current: &Snapshot) -> Result<SnapshotDiff> {
    let mut diff = SnapshotDiff::default();

    for bucket in Bucket::ALL {
        let before = previous.bucket(bucket);
        let after = current.bucket(bucket);

        merge_disjoint(&mut diff.added, missing_from(after, before))?;
        merge_disjoint(&mut diff.removed, missing_from(before, after))?;

        for (name, version) in after {
            if let Some(old) = before.get(name) {
                if old != version {
                    diff.version_changed.insert(
                        name.clone(),
                        VersionChange {
                            previous: old.clone(),
                            current: version.clone(),
                        },
                    );
                }
            }
        }
    }

    tracing::debug!(
        "Diff: {} added, {} removed, {} version changes",
        diff.added.len(),
        diff.removed.len(),
        diff.version_changed.len()
    );

    Ok(diff)
}

/// Entries of `source` whose name is absent from `other`.
fn missing_from(source: &PackageMap, other: &PackageMap) -> PackageMap {
    source
        .iter()
        .filter(|(name, _)| !other.contains_key(*name))
        .map(|(name, version)| (name.clone(), version.clone()))
        .collect()
}

fn merge_disjoint(target: &mut PackageMap, entries: PackageMap) -> Result<()> {
    for (name, version) in entries {
        if target.contains_key(&name) {
            return Err(SnapshotError::BucketOverlap { name });
        }
        target.insert(name, version);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> PackageMap {
        entries
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    fn snapshot(official: &[(&str, &str)], third_party: &[(&str, &str)]) -> Snapshot {
        Snapshot::new(map(official), map(third_party)).unwrap()
    }

    #[test]
    fn test_diff_against_itself_is_empty() {
        let current = snapshot(&[("vim", "9.0"), ("git", "2.1")], &[("yay", "1.2")]);
        let diff = diff_snapshots(&current, &current).unwrap();

        assert!(diff.is_empty());
        assert!(diff.version_changed.is_empty());
    }

    #[test]
    fn test_diff_with_empty_previous_adds_everything() {
        let current = snapshot(&[("vim", "9.0")], &[("yay", "1.2")]);
        let diff = diff_snapshots(&Snapshot::empty(), &current).unwrap();

        assert_eq!(diff.added, map(&[("vim", "9.0"), ("yay", "1.2")]));
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_new_third_party_package() {
        let previous = snapshot(&[("vim", "9.0")], &[]);
        let current = snapshot(&[("vim", "9.0")], &[("yay", "1.2")]);
        let diff = diff_snapshots(&previous, &current).unwrap();

        assert_eq!(diff.added, map(&[("yay", "1.2")]));
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_removed_official_package_keeps_previous_version() {
        let previous = snapshot(&[("vim", "9.0"), ("git", "2.1")], &[]);
        let current = snapshot(&[("vim", "9.0")], &[]);
        let diff = diff_snapshots(&previous, &current).unwrap();

        assert!(diff.added.is_empty());
        assert_eq!(diff.removed, map(&[("git", "2.1")]));
    }

    #[test]
    fn test_bucket_move_is_removed_and_added() {
        let previous = snapshot(&[], &[("paru", "2.0")]);
        let current = snapshot(&[("paru", "2.0")], &[]);
        let diff = diff_snapshots(&previous, &current).unwrap();

        assert_eq!(diff.added, map(&[("paru", "2.0")]));
        assert_eq!(diff.removed, map(&[("paru", "2.0")]));
    }

    #[test]
    fn test_version_only_change_is_not_added_or_removed() {
        let previous = snapshot(&[("vim", "9.0")], &[]);
        let current = snapshot(&[("vim", "9.1")], &[]);
        let diff = diff_snapshots(&previous, &current).unwrap();

        assert!(diff.is_empty());
        assert_eq!(
            diff.version_changed["vim"],
            VersionChange {
                previous: "9.0".to_string(),
                current: "9.1".to_string(),
            }
        );
    }

    #[test]
    fn test_overlapping_current_is_rejected() {
        // 直接反序列化可繞過 Snapshot::new 的檢查
        let current: Snapshot = serde_json::from_value(serde_json::json!({
            "official": {"yay": "1.2"},
            "third_party": {"yay": "1.2"}
        }))
        .unwrap();

        let err = diff_snapshots(&Snapshot::empty(), &current).unwrap_err();
        assert!(matches!(err, SnapshotError::BucketOverlap { name } if name == "yay"));
    }
}
