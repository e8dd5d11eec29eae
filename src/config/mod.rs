pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, RepositoryReference};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "readme-rover")]
#[command(about = "Fetch a GitHub README, normalize it and append it to a CSV file")]
pub struct CliConfig {
    /// Repository to process (owner/name or URL); the configured default is used when omitted
    pub repository: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV file to append to
    #[arg(short, long)]
    pub output: Option<String>,

    /// Base URL of the GitHub host
    #[arg(long)]
    pub base_url: Option<String>,

    /// Keep English stop words in the processed text
    #[arg(long)]
    pub keep_stopwords: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 讀取設定檔（若有），再套用命令列覆蓋
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(output) = &self.output {
            config.load.output_path = output.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.source.base_url = base_url.clone();
        }
        if self.keep_stopwords {
            config.normalize.remove_stopwords = false;
        }

        Ok(config)
    }

    /// 命令列參數優先，否則使用設定中的預設倉庫
    pub fn repository_reference<C: ConfigProvider>(&self, config: &C) -> Result<RepositoryReference> {
        let value = self
            .repository
            .as_deref()
            .unwrap_or_else(|| config.default_repository());
        RepositoryReference::parse(value)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_positional_repository() {
        let cli = CliConfig::parse_from(["readme-rover", "https://github.com/owner/repo"]);
        let config = cli.resolve().unwrap();

        assert_eq!(
            cli.repository_reference(&config).unwrap().as_str(),
            "owner/repo"
        );
        assert_eq!(config.output_path(), toml_config::DEFAULT_OUTPUT_PATH);
    }

    #[test]
    fn test_default_repository_when_omitted() {
        let cli = CliConfig::parse_from(["readme-rover"]);
        let config = cli.resolve().unwrap();

        assert_eq!(
            cli.repository_reference(&config).unwrap().as_str(),
            toml_config::DEFAULT_REPOSITORY
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[source]\nbase_url = \"https://from-file.example.com\"\ndefault_repository = \"a/b\"\n\n[load]\noutput_path = \"file.csv\"\n",
            )
            .unwrap();

        let cli = CliConfig::parse_from([
            "readme-rover",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--output",
            "cli.csv",
            "--keep-stopwords",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.output_path(), "cli.csv");
        assert_eq!(config.base_url(), "https://from-file.example.com");
        assert!(!config.remove_stopwords());
        assert_eq!(cli.repository_reference(&config).unwrap().as_str(), "a/b");
    }

    #[test]
    fn test_invalid_repository_argument() {
        let cli = CliConfig::parse_from(["readme-rover", "not a repo"]);
        let config = cli.resolve().unwrap();
        assert!(cli.repository_reference(&config).is_err());
    }
}
