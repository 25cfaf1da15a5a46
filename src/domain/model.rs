use crate::utils::error::{Result, SnapshotError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 套件名稱 -> 版本字串（版本不做解析）
pub type PackageMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Official,
    ThirdParty,
}

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::Official, Bucket::ThirdParty];
}

/// Explicitly installed packages split by origin.
///
/// Older snapshot files use `pacman` / `aur` as bucket keys; both spellings
/// are read, only the new ones are written. A bucket missing from the file
/// reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, alias = "pacman")]
    official: PackageMap,
    #[serde(default, alias = "aur")]
    third_party: PackageMap,
}

impl Snapshot {
    /// Builds a snapshot, rejecting any name present in both buckets.
    pub fn new(official: PackageMap, third_party: PackageMap) -> Result<Self> {
        let snapshot = Self {
            official,
            third_party,
        };
        snapshot.check_partition()?;
        Ok(snapshot)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bucket(&self, bucket: Bucket) -> &PackageMap {
        match bucket {
            Bucket::Official => &self.official,
            Bucket::ThirdParty => &self.third_party,
        }
    }

    pub fn official(&self) -> &PackageMap {
        &self.official
    }

    pub fn third_party(&self) -> &PackageMap {
        &self.third_party
    }

    pub fn len(&self) -> usize {
        self.official.len() + self.third_party.len()
    }

    pub fn is_empty(&self) -> bool {
        self.official.is_empty() && self.third_party.is_empty()
    }

    pub fn check_partition(&self) -> Result<()> {
        match self
            .third_party
            .keys()
            .find(|name| self.official.contains_key(*name))
        {
            Some(name) => Err(SnapshotError::BucketOverlap { name: name.clone() }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChange {
    pub previous: String,
    pub current: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    pub added: PackageMap,
    pub removed: PackageMap,
    /// 同一 bucket 內僅版本變動的套件，預設不顯示
    pub version_changed: BTreeMap<String, VersionChange>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// 三個套件資料庫查詢的原始輸出
#[derive(Debug, Clone, Default)]
pub struct RawListings {
    pub explicit: String,
    pub foreign: String,
    pub official_names: String,
}

#[derive(Debug, Clone)]
pub struct Extracted {
    pub previous: Snapshot,
    pub listings: RawListings,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub current: Snapshot,
    pub diff: SnapshotDiff,
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

    #[test]
    fn test_new_rejects_overlap() {
        let err = Snapshot::new(map(&[("yay", "1.2")]), map(&[("yay", "1.2")])).unwrap_err();
        assert!(matches!(err, SnapshotError::BucketOverlap { name } if name == "yay"));
    }

    #[test]
    fn test_legacy_keys_deserialize() {
        let json = r#"{"pacman": {"vim": "9.0"}, "aur": {"yay": "1.2"}}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.official(), &map(&[("vim", "9.0")]));
        assert_eq!(snapshot.third_party(), &map(&[("yay", "1.2")]));
    }

    #[test]
    fn test_missing_buckets_deserialize_empty() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());

        let snapshot: Snapshot = serde_json::from_str(r#"{"official": {"vim": "9.0"}}"#).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.bucket(Bucket::ThirdParty).is_empty());
    }

    #[test]
    fn test_serializes_new_keys() {
        let snapshot = Snapshot::new(map(&[("vim", "9.0")]), map(&[("yay", "1.2")])).unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"official": {"vim": "9.0"}, "third_party": {"yay": "1.2"}})
        );
    }
}
