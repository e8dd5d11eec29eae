use crate::domain::model::{ProcessedRecord, RawReadme, RepositoryReference};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// 將 `data` 以單次寫入附加到檔案尾端，檔案不存在時建立
    fn append_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn default_repository(&self) -> &str;
    fn remove_stopwords(&self) -> bool;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, reference: &RepositoryReference) -> Result<RawReadme>;
    async fn transform(
        &self,
        reference: &RepositoryReference,
        raw: RawReadme,
    ) -> Result<ProcessedRecord>;
    async fn is_duplicate(&self, reference: &RepositoryReference) -> Result<bool>;
    async fn load(&self, record: ProcessedRecord) -> Result<String>;
}
