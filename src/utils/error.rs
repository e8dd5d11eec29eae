use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoverError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Repository not found: {reference}")]
    RepositoryNotFound { reference: String },

    #[error("No README found for repository: {reference}")]
    ReadmeNotFound { reference: String },

    #[error("Invalid repository reference '{value}': {reason}")]
    InvalidReference { value: String, reason: String },

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Content processing error: {message}")]
    ParseError { message: String },

    #[error("Output store format error in {path}: {message}")]
    StoreFormatError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類，對應管道中發生失敗的階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Parse,
    Write,
    Config,
}

impl RoverError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RoverError::HttpError(_)
            | RoverError::HttpStatusError { .. }
            | RoverError::RepositoryNotFound { .. }
            | RoverError::ReadmeNotFound { .. } => ErrorCategory::Fetch,
            RoverError::ParseError { .. }
            | RoverError::StoreFormatError { .. }
            | RoverError::CsvError(_) => ErrorCategory::Parse,
            RoverError::IoError(_) => ErrorCategory::Write,
            RoverError::InvalidReference { .. }
            | RoverError::UrlError(_)
            | RoverError::ConfigError { .. }
            | RoverError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            RoverError::HttpError(e) if e.is_timeout() => {
                "The request to GitHub timed out".to_string()
            }
            RoverError::HttpError(_) => "Could not reach GitHub (network error)".to_string(),
            RoverError::HttpStatusError { url, status } => {
                format!("GitHub answered {} for {}", status, url)
            }
            RoverError::RepositoryNotFound { reference } => {
                format!("Repository '{}' does not exist", reference)
            }
            RoverError::ReadmeNotFound { reference } => {
                format!("Repository '{}' has no README", reference)
            }
            RoverError::IoError(e) => format!("Could not write the output file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Fetch => match self {
                RoverError::RepositoryNotFound { .. } => {
                    "Check the owner/name spelling of the repository"
                }
                RoverError::ReadmeNotFound { .. } => {
                    "Pick a repository that has a README at its root"
                }
                _ => "Check your network connection and --base-url, then try again",
            },
            ErrorCategory::Parse => {
                "Inspect the README or the output CSV; a hand-edited CSV may have lost its header"
            }
            ErrorCategory::Write => "Make sure the output path is writable",
            ErrorCategory::Config => "Fix the argument or configuration value and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, RoverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failures_share_category() {
        let not_found = RoverError::RepositoryNotFound {
            reference: "owner/repo".to_string(),
        };
        let no_readme = RoverError::ReadmeNotFound {
            reference: "owner/repo".to_string(),
        };
        let status = RoverError::HttpStatusError {
            url: "https://github.com/owner/repo".to_string(),
            status: 503,
        };

        assert_eq!(not_found.category(), ErrorCategory::Fetch);
        assert_eq!(no_readme.category(), ErrorCategory::Fetch);
        assert_eq!(status.category(), ErrorCategory::Fetch);
    }

    #[test]
    fn test_write_and_parse_categories() {
        let io = RoverError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let parse = RoverError::ParseError {
            message: "empty".to_string(),
        };

        assert_eq!(io.category(), ErrorCategory::Write);
        assert_eq!(parse.category(), ErrorCategory::Parse);
        assert_eq!(io.recovery_suggestion(), "Make sure the output path is writable");
    }

    #[test]
    fn test_user_friendly_message_names_repository() {
        let err = RoverError::ReadmeNotFound {
            reference: "owner/repo".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Repository 'owner/repo' has no README");
    }
}
