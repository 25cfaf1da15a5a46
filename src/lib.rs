pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::pacman::PacmanSource;
pub use config::cli::JsonFileStore;
pub use config::toml_config::TomlConfig;
pub use crate::core::{engine::SnapshotEngine, pipeline::SnapshotPipeline};
pub use domain::model::{Bucket, PackageMap, Snapshot, SnapshotDiff};
pub use utils::error::{Result, SnapshotError};
