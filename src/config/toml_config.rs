use crate::core::parse::MalformedLinePolicy;
use crate::core::report::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SnapshotError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    #[serde(default = "default_previous")]
    pub previous: PathBuf,
    #[serde(default = "default_current")]
    pub current: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default = "default_pacman")]
    pub pacman: String,
    #[serde(default)]
    pub malformed_lines: MalformedLinePolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub show_version_changes: bool,
}

fn default_previous() -> PathBuf {
    PathBuf::from("previous.json")
}

fn default_current() -> PathBuf {
    PathBuf::from("current.json")
}

fn default_pacman() -> String {
    "pacman".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            previous: default_previous(),
            current: default_current(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pacman: default_pacman(),
            malformed_lines: MalformedLinePolicy::default(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SnapshotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})；未定義的變數視為錯誤
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            SnapshotError::ConfigError {
                message: format!("invalid substitution pattern: {}", e),
            }
        })?;

        let mut missing = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.push(var_name.to_string());
                String::new()
            })
        });

        if !missing.is_empty() {
            return Err(SnapshotError::ConfigError {
                message: format!("undefined environment variables: {}", missing.join(", ")),
            });
        }

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn previous_path(&self) -> &Path {
        &self.paths.previous
    }

    fn current_path(&self) -> &Path {
        &self.paths.current
    }

    fn pacman_binary(&self) -> &str {
        &self.source.pacman
    }

    fn malformed_lines(&self) -> MalformedLinePolicy {
        self.source.malformed_lines
    }

    fn show_version_changes(&self) -> bool {
        self.report.show_version_changes
    }

    fn output_format(&self) -> OutputFormat {
        self.report.format
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::config::validate_provider(self)
    }
}
