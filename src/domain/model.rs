use crate::utils::error::{Result, RoverError};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// 以 `owner/name` 形式保存的 GitHub 倉庫參照
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryReference {
    owner: String,
    name: String,
    canonical: String,
}

impl RepositoryReference {
    /// 解析 `owner/name` 或完整的倉庫 URL
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(invalid(value, "reference cannot be empty"));
        }

        let is_url = trimmed.starts_with("http://") || trimmed.starts_with("https://");
        let path = if is_url {
            let url = Url::parse(trimmed).map_err(|e| invalid(value, &e.to_string()))?;
            url.path().to_string()
        } else {
            trimmed.to_string()
        };

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments
            .next()
            .ok_or_else(|| invalid(value, "missing repository owner"))?;
        let name = segments
            .next()
            .ok_or_else(|| invalid(value, "expected owner/name"))?;
        let name = name.strip_suffix(".git").unwrap_or(name);

        // 非 URL 形式不允許多餘的路徑段
        if !is_url && segments.next().is_some() {
            return Err(invalid(value, "expected owner/name"));
        }

        for part in [owner, name] {
            if part.is_empty() || !part.chars().all(is_name_char) {
                return Err(invalid(
                    value,
                    &format!("'{}' is not a valid owner or repository name", part),
                ));
            }
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            canonical: format!("{}/{}", owner, name),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 去重時比對的鍵
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

fn invalid(value: &str, reason: &str) -> RoverError {
    RoverError::InvalidReference {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Fetcher 取回、尚未處理的 README 內容
#[derive(Debug, Clone)]
pub struct RawReadme {
    pub source_url: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// 寫入 CSV 的一列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    #[serde(rename = "Processed At")]
    pub processed_at: String,
    #[serde(rename = "Repository Name")]
    pub repository: String,
    #[serde(rename = "Homepage URL")]
    pub homepage_url: String,
    #[serde(rename = "Processed Readme.MD Content")]
    pub processed_text: String,
}

/// Driver 的終止狀態（失敗以 `Err` 表示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed {
        repository: String,
        output_path: String,
    },
    SkippedDuplicate {
        repository: String,
    },
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Completed {
                repository,
                output_path,
            } => write!(f, "Processed repository {} -> {}", repository, output_path),
            RunOutcome::SkippedDuplicate { repository } => {
                write!(f, "Skipping duplicate repository: {}", repository)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_name() {
        let reference = RepositoryReference::parse("rust-lang/rust").unwrap();
        assert_eq!(reference.owner(), "rust-lang");
        assert_eq!(reference.name(), "rust");
        assert_eq!(reference.as_str(), "rust-lang/rust");
    }

    #[test]
    fn test_parse_url_forms_canonicalize() {
        let plain = RepositoryReference::parse("tokio-rs/tokio").unwrap();
        let url = RepositoryReference::parse("https://github.com/tokio-rs/tokio").unwrap();
        let git = RepositoryReference::parse("https://github.com/tokio-rs/tokio.git").unwrap();
        let deep = RepositoryReference::parse("https://github.com/tokio-rs/tokio/tree/master").unwrap();

        assert_eq!(plain, url);
        assert_eq!(plain, git);
        assert_eq!(plain, deep);
    }

    #[test]
    fn test_parse_trims_whitespace_and_slashes() {
        let reference = RepositoryReference::parse("  owner/repo.rs/ ").unwrap();
        assert_eq!(reference.to_string(), "owner/repo.rs");
    }

    #[test]
    fn test_parse_rejects_invalid_references() {
        assert!(RepositoryReference::parse("").is_err());
        assert!(RepositoryReference::parse("just-owner").is_err());
        assert!(RepositoryReference::parse("owner/repo/extra").is_err());
        assert!(RepositoryReference::parse("own er/repo").is_err());
        assert!(RepositoryReference::parse("https://github.com/").is_err());
    }

    #[test]
    fn test_outcome_display() {
        let skipped = RunOutcome::SkippedDuplicate {
            repository: "owner/repo".to_string(),
        };
        assert_eq!(skipped.to_string(), "Skipping duplicate repository: owner/repo");
    }
}
