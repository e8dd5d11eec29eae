use crate::core::fetch::GithubFetcher;
use crate::core::normalize::{normalize, NormalizeOptions};
use crate::core::store::CsvStore;
use crate::core::{ConfigProvider, Pipeline, ProcessedRecord, RawReadme, RepositoryReference, Storage};
use crate::utils::error::{Result, RoverError};

/// Fetch → normalize → dedup → append, backed by GitHub pages and a CSV store.
pub struct ReadmePipeline<S: Storage, C: ConfigProvider> {
    fetcher: GithubFetcher,
    store: CsvStore<S>,
    options: NormalizeOptions,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReadmePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let fetcher = GithubFetcher::new(
            config.base_url(),
            config.user_agent(),
            config.timeout_seconds(),
        )?;
        let store = CsvStore::new(storage, config.output_path().to_string());
        let options = NormalizeOptions {
            remove_stopwords: config.remove_stopwords(),
        };

        Ok(Self {
            fetcher,
            store,
            options,
            config,
        })
    }

    pub fn store(&self) -> &CsvStore<S> {
        &self.store
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReadmePipeline<S, C> {
    async fn extract(&self, reference: &RepositoryReference) -> Result<RawReadme> {
        tracing::debug!("Fetching README for {} from {}", reference, self.config.base_url());
        self.fetcher.fetch(reference).await
    }

    async fn transform(
        &self,
        reference: &RepositoryReference,
        raw: RawReadme,
    ) -> Result<ProcessedRecord> {
        let processed_text = normalize(&raw.body, &self.options);
        if processed_text.is_empty() {
            return Err(RoverError::ParseError {
                message: format!("README at {} contains no words", raw.source_url),
            });
        }

        tracing::debug!(
            "Normalized {} bytes ({}) into {} tokens",
            raw.body.len(),
            raw.content_type.as_deref().unwrap_or("unknown content type"),
            processed_text.split(' ').count()
        );

        Ok(ProcessedRecord {
            processed_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            repository: reference.to_string(),
            homepage_url: self.fetcher.repository_url(reference)?.to_string(),
            processed_text,
        })
    }

    async fn is_duplicate(&self, reference: &RepositoryReference) -> Result<bool> {
        self.store.contains(reference.as_str()).await
    }

    async fn load(&self, record: ProcessedRecord) -> Result<String> {
        self.store.append(&record).await?;
        Ok(self.store.path().to_string())
    }
}
