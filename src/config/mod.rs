pub mod cli;
pub mod toml_config;

use crate::core::parse::MalformedLinePolicy;
use crate::core::report::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;
use std::path::Path;

#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "pkg-snapshot")]
#[command(
    about = "Snapshot explicitly installed packages and report what changed since the previous snapshot"
)]
#[command(
    after_help = "The previous snapshot is never written. Move current.json to previous.json between runs to compare against the last run."
)]
pub struct CliConfig {
    /// Snapshot from an earlier run (read only)
    #[arg(long, default_value = "previous.json")]
    pub previous: PathBuf,

    /// Where to write this run's snapshot (overwritten)
    #[arg(long, default_value = "current.json")]
    pub current: PathBuf,

    /// Package database tool to query
    #[arg(long, default_value = "pacman")]
    pub pacman: String,

    /// Skip malformed listing lines instead of aborting
    #[arg(long)]
    pub skip_malformed: bool,

    /// Also list packages whose version changed within the same bucket
    #[arg(long)]
    pub show_version_changes: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn previous_path(&self) -> &Path {
        &self.previous
    }

    fn current_path(&self) -> &Path {
        &self.current
    }

    fn pacman_binary(&self) -> &str {
        &self.pacman
    }

    fn malformed_lines(&self) -> MalformedLinePolicy {
        if self.skip_malformed {
            MalformedLinePolicy::Skip
        } else {
            MalformedLinePolicy::Fail
        }
    }

    fn show_version_changes(&self) -> bool {
        self.show_version_changes
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// 共用的設定檢查，CLI 與 TOML 設定都走這裡
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_path("previous", config.previous_path())?;
    validation::validate_path("current", config.current_path())?;
    validation::validate_distinct_paths(config.previous_path(), config.current_path())?;
    validation::validate_non_empty_string("pacman", config.pacman_binary())?;
    Ok(())
}
