use crate::core::{ProcessedRecord, Storage};
use crate::utils::error::{Result, RoverError};

/// CSV 中作為去重鍵的欄位
pub const REPOSITORY_COLUMN: &str = "Repository Name";

/// Append-only CSV store of processed READMEs, keyed by repository.
pub struct CsvStore<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> CsvStore<S> {
    pub fn new(storage: S, path: String) -> Self {
        Self { storage, path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 依檔案順序列出已存在的倉庫鍵
    pub async fn references(&self) -> Result<Vec<String>> {
        if !self.storage.exists(&self.path).await? {
            return Ok(Vec::new());
        }

        let data = self.storage.read_file(&self.path).await?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_slice());

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let column = headers
            .iter()
            .position(|header| header == REPOSITORY_COLUMN)
            .ok_or_else(|| RoverError::StoreFormatError {
                path: self.path.clone(),
                message: format!("header has no '{}' column", REPOSITORY_COLUMN),
            })?;

        let mut references = Vec::new();
        for row in reader.records() {
            let row = row?;
            if let Some(value) = row.get(column) {
                references.push(value.to_string());
            }
        }

        Ok(references)
    }

    pub async fn contains(&self, reference: &str) -> Result<bool> {
        Ok(self
            .references()
            .await?
            .iter()
            .any(|existing| existing == reference))
    }

    /// 附加一列；檔案不存在或為空時先寫表頭
    pub async fn append(&self, record: &ProcessedRecord) -> Result<()> {
        let existing = if self.storage.exists(&self.path).await? {
            self.storage.read_file(&self.path).await?
        } else {
            Vec::new()
        };
        let needs_header = existing.is_empty();

        // 最後一列缺少換行時先補上，否則新列會接在舊列尾端
        let mut data = Vec::new();
        if existing.last().is_some_and(|byte| *byte != b'\n') {
            data.push(b'\n');
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(data);
        writer.serialize(record)?;
        let data = writer
            .into_inner()
            .map_err(|e| RoverError::IoError(e.into_error()))?;

        tracing::debug!(
            "Appending {} bytes to {} (header: {})",
            data.len(),
            self.path,
            needs_header
        );
        self.storage.append_file(&self.path, &data).await
    }
}
