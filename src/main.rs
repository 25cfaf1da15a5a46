use clap::Parser;
use pkg_snapshot::core::report;
use pkg_snapshot::core::ConfigProvider;
use pkg_snapshot::utils::error::{ErrorSeverity, SnapshotError};
use pkg_snapshot::utils::{logger, validation::Validate};
use pkg_snapshot::{CliConfig, JsonFileStore, PacmanSource, SnapshotEngine, SnapshotPipeline, TomlConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            match TomlConfig::from_file(&path) {
                Ok(config) => run(config).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli).await,
    };

    if let Err(e) = outcome {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Snapshot run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run<C>(config: C) -> Result<(), SnapshotError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let format = config.output_format();
    let show_version_changes = config.show_version_changes();
    let source = PacmanSource::new(config.pacman_binary());
    let pipeline = SnapshotPipeline::new(source, JsonFileStore::new(), config);

    let outcome = SnapshotEngine::new(pipeline).run().await?;
    tracing::info!(
        "✅ {} added, {} removed",
        outcome.diff.added.len(),
        outcome.diff.removed.len()
    );

    print!(
        "{}",
        report::render(&outcome.diff, format, show_version_changes)?
    );
    Ok(())
}
