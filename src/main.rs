use cdp_stake::config::build_engine;
use cdp_stake::utils::{logger, validation::Validate};
use cdp_stake::CliConfig;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting cdp-stake CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let result = match build_engine(&config) {
        Ok(engine) => engine.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            tracing::info!(
                "✅ Staking operation {} finished ({} transaction(s) broadcast)",
                report.operation_id,
                report.broadcasts.len()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Staking failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            if e.is_retryable() {
                tracing::warn!("🔁 This error is transient; running again may succeed");
            }

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
