use crate::domain::model::{PackageMap, Snapshot};
use crate::utils::error::Result;
use std::collections::BTreeSet;

/// Keeps only the foreign packages that no official repository provides.
pub fn filter_third_party(foreign: &PackageMap, official_names: &BTreeSet<String>) -> PackageMap {
    foreign
        .iter()
        .filter(|(name, _)| !official_names.contains(*name))
        .map(|(name, version)| (name.clone(), version.clone()))
        .collect()
}

/// Explicitly installed packages minus the third-party bucket.
pub fn official_remainder(explicit: &PackageMap, third_party: &PackageMap) -> PackageMap {
    explicit
        .iter()
        .filter(|(name, _)| !third_party.contains_key(*name))
        .map(|(name, version)| (name.clone(), version.clone()))
        .collect()
}

/// Splits the explicit set into official and third-party buckets.
pub fn classify(
    explicit: &PackageMap,
    foreign: &PackageMap,
    official_names: &BTreeSet<String>,
) -> Result<Snapshot> {
    // third-party 必須先算，official 是剩下的部分
    let third_party = filter_third_party(foreign, official_names);
    let official = official_remainder(explicit, &third_party);

    tracing::debug!(
        "Classified {} official and {} third-party packages",
        official.len(),
        third_party.len()
    );

    Snapshot::new(official, third_party)
}
