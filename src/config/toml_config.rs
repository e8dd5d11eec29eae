use crate::core::fetch::DEFAULT_USER_AGENT;
use crate::core::{ConfigProvider, RepositoryReference};
use crate::utils::error::{Result, RoverError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_BASE_URL: &str = "https://github.com";
pub const DEFAULT_REPOSITORY: &str = "rust-lang/rust";
pub const DEFAULT_OUTPUT_PATH: &str = "readmeMD.csv";

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

/// 單次執行所需的完整設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub normalize: NormalizeConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub default_repository: String,
    pub user_agent: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_repository: DEFAULT_REPOSITORY.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub remove_stopwords: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            remove_stopwords: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RoverError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GITHUB_MIRROR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }

    fn default_repository(&self) -> &str {
        &self.source.default_repository
    }

    fn remove_stopwords(&self) -> bool {
        self.normalize.remove_stopwords
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_non_empty_string("source.user_agent", &self.source.user_agent)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }
        RepositoryReference::parse(&self.source.default_repository).map_err(|e| {
            RoverError::InvalidConfigValueError {
                field: "source.default_repository".to_string(),
                value: self.source.default_repository.clone(),
                reason: e.to_string(),
            }
        })?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
base_url = "https://github.example.com"
default_repository = "serde-rs/serde"
user_agent = "test-agent"
timeout_seconds = 10

[normalize]
remove_stopwords = false

[load]
output_path = "./data/readmes.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "https://github.example.com");
        assert_eq!(config.default_repository(), "serde-rs/serde");
        assert_eq!(config.user_agent(), "test-agent");
        assert_eq!(config.timeout_seconds(), Some(10));
        assert!(!config.remove_stopwords());
        assert_eq!(config.output_path(), "./data/readmes.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = TomlConfig::from_toml_str("[load]\noutput_path = \"x.csv\"\n").unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.default_repository(), DEFAULT_REPOSITORY);
        assert_eq!(config.timeout_seconds(), None);
        assert!(config.remove_stopwords());
        assert_eq!(config.output_path(), "x.csv");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("README_ROVER_TEST_MIRROR", "https://mirror.example.com");

        let toml_content = r#"
[source]
base_url = "${README_ROVER_TEST_MIRROR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "https://mirror.example.com");

        std::env::remove_var("README_ROVER_TEST_MIRROR");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[source]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_repo =
            TomlConfig::from_toml_str("[source]\ndefault_repository = \"nope\"\n").unwrap();
        assert!(matches!(
            bad_repo.validate(),
            Err(RoverError::InvalidConfigValueError { .. })
        ));

        let zero_timeout =
            TomlConfig::from_toml_str("[source]\ntimeout_seconds = 0\n").unwrap();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[source\nbase_url = ").unwrap_err();
        assert!(matches!(err, RoverError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\ndefault_repository = \"tokio-rs/tokio\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.default_repository(), "tokio-rs/tokio");
    }
}
