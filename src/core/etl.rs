use crate::core::{Pipeline, RepositoryReference, RunOutcome};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// 依序執行 Fetch → Normalize → Dedup → Write；失敗一律向上回傳，不重試
    pub async fn run(&self, reference: &RepositoryReference) -> Result<RunOutcome> {
        tracing::info!("🚀 Processing repository {}", reference);

        // Extract
        let raw = self.pipeline.extract(reference).await?;
        tracing::info!("📥 Fetched README from {}", raw.source_url);

        // Transform
        let record = self.pipeline.transform(reference, raw).await?;
        tracing::info!(
            "🛠️ Normalized README into {} characters",
            record.processed_text.len()
        );

        // Dedup
        if self.pipeline.is_duplicate(reference).await? {
            tracing::info!("⏭️ Skipping duplicate repository: {}", reference);
            return Ok(RunOutcome::SkippedDuplicate {
                repository: reference.to_string(),
            });
        }

        // Load
        let output_path = self.pipeline.load(record).await?;
        tracing::info!("📁 Appended {} to {}", reference, output_path);

        Ok(RunOutcome::Completed {
            repository: reference.to_string(),
            output_path,
        })
    }
}
