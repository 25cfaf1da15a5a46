use crate::core::parse::MalformedLinePolicy;
use crate::core::report::OutputFormat;
use crate::domain::model::{Extracted, Snapshot, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Raw line-oriented listings from the package database.
pub trait PackageSource: Send + Sync {
    /// `name version` per explicitly installed package.
    fn explicit_packages(&self) -> impl std::future::Future<Output = Result<String>> + Send;
    /// `name version` per explicitly installed package not found in any sync repository.
    fn foreign_packages(&self) -> impl std::future::Future<Output = Result<String>> + Send;
    /// One package name per line for every package in the official repositories.
    fn official_package_names(&self) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait SnapshotStore: Send + Sync {
    fn load(&self, path: &Path) -> impl std::future::Future<Output = Result<Snapshot>> + Send;
    fn save(
        &self,
        path: &Path,
        snapshot: &Snapshot,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn previous_path(&self) -> &Path;
    fn current_path(&self) -> &Path;
    fn pacman_binary(&self) -> &str;
    fn malformed_lines(&self) -> MalformedLinePolicy;
    fn show_version_changes(&self) -> bool;
    fn output_format(&self) -> OutputFormat;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Extracted>;
    async fn transform(&self, data: Extracted) -> Result<TransformResult>;
    async fn load(&self, result: &TransformResult) -> Result<String>;
}
