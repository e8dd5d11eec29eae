use anyhow::Context;
use clap::Parser;
use readme_rover::core::ConfigProvider;
use readme_rover::utils::{logger, validation::Validate};
use readme_rover::{CliConfig, EtlEngine, LocalStorage, ReadmePipeline, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting readme-rover");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli.resolve().context("failed to load configuration")?;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        println!("❌ {}", e.user_friendly_message());
        println!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let reference = match cli.repository_reference(&config) {
        Ok(reference) => reference,
        Err(e) => {
            println!("❌ {}", e.user_friendly_message());
            println!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 建立存儲、管道與引擎
    let storage = LocalStorage::new(".".to_string());
    let output_path = config.output_path().to_string();
    let pipeline = ReadmePipeline::new(storage, config)
        .context("failed to build the HTTP client")?;
    let engine = EtlEngine::new(pipeline);

    match engine.run(&reference).await {
        Ok(outcome @ RunOutcome::Completed { .. }) => {
            println!("✅ {}", outcome);
        }
        Ok(outcome @ RunOutcome::SkippedDuplicate { .. }) => {
            println!("⏭️ {}", outcome);
        }
        Err(e) => {
            tracing::error!(
                "❌ Processing {} failed: {} (Category: {:?})",
                reference,
                e,
                e.category()
            );
            println!("❌ {}", e.user_friendly_message());
            println!("💡 {}", e.recovery_suggestion());
            println!("📁 {} was left unchanged", output_path);
            std::process::exit(1);
        }
    }

    Ok(())
}
