use crate::core::Pipeline;
use crate::domain::model::{Snapshot, SnapshotDiff};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub current: Snapshot,
    pub diff: SnapshotDiff,
    pub written_to: String,
}

pub struct SnapshotEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SnapshotEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting package snapshot...");

        // Extract
        let extracted = self.pipeline.extract().await?;
        tracing::info!(
            "Previous snapshot has {} packages",
            extracted.previous.len()
        );

        // Transform
        let result = self.pipeline.transform(extracted).await?;
        tracing::info!(
            "Current snapshot: {} official, {} third-party",
            result.current.official().len(),
            result.current.third_party().len()
        );

        // Load：前面任何一步失敗都不會寫檔
        let written_to = self.pipeline.load(&result).await?;
        tracing::info!("📁 Snapshot saved to: {}", written_to);

        Ok(RunOutcome {
            current: result.current,
            diff: result.diff,
            written_to,
        })
    }
}
