use crate::core::classify::classify;
use crate::core::diff::diff_snapshots;
use crate::core::parse::{parse_name_list, parse_package_list};
use crate::core::{
    ConfigProvider, Extracted, PackageSource, Pipeline, RawListings, SnapshotStore,
    TransformResult,
};
use crate::utils::error::Result;

/// Load previous snapshot, query the package database, classify, diff, save.
pub struct SnapshotPipeline<P: PackageSource, S: SnapshotStore, C: ConfigProvider> {
    source: P,
    store: S,
    config: C,
}

impl<P: PackageSource, S: SnapshotStore, C: ConfigProvider> SnapshotPipeline<P, S, C> {
    pub fn new(source: P, store: S, config: C) -> Self {
        Self {
            source,
            store,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<P: PackageSource, S: SnapshotStore, C: ConfigProvider> Pipeline for SnapshotPipeline<P, S, C> {
    async fn extract(&self) -> Result<Extracted> {
        let previous_path = self.config.previous_path();
        tracing::debug!("Loading previous snapshot from {}", previous_path.display());
        let previous = self.store.load(previous_path).await?;

        // 依序執行，不並行
        let explicit = self.source.explicit_packages().await?;
        let foreign = self.source.foreign_packages().await?;
        let official_names = self.source.official_package_names().await?;

        Ok(Extracted {
            previous,
            listings: RawListings {
                explicit,
                foreign,
                official_names,
            },
        })
    }

    async fn transform(&self, data: Extracted) -> Result<TransformResult> {
        let policy = self.config.malformed_lines();
        let explicit = parse_package_list(&data.listings.explicit, policy)?;
        let foreign = parse_package_list(&data.listings.foreign, policy)?;
        let official_names = parse_name_list(&data.listings.official_names);

        tracing::debug!(
            "{} explicit, {} foreign, {} names in official repositories",
            explicit.len(),
            foreign.len(),
            official_names.len()
        );

        let current = classify(&explicit, &foreign, &official_names)?;
        let diff = diff_snapshots(&data.previous, &current)?;

        Ok(TransformResult { current, diff })
    }

    async fn load(&self, result: &TransformResult) -> Result<String> {
        let current_path = self.config.current_path();
        self.store.save(current_path, &result.current).await?;
        Ok(current_path.display().to_string())
    }
}
