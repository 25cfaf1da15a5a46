pub mod classify;
pub mod diff;
pub mod engine;
pub mod parse;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{Extracted, RawListings, TransformResult};
pub use crate::domain::ports::{ConfigProvider, PackageSource, Pipeline, SnapshotStore};
pub use crate::utils::error::Result;
