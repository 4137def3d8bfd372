use cdp_stake::config::build_engine;
use cdp_stake::core::ConfigProvider;
use cdp_stake::utils::{logger, validation::Validate};
use cdp_stake::TomlConfig;
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-stake")]
#[command(about = "Stake SOL using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "stake-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the amount from the config file
    #[arg(long)]
    amount: Option<String>,

    /// Build and sign only, overriding the config file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose || config.verbose(), config.log_json());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(amount) = args.amount {
        tracing::info!("🔧 Amount overridden to: {}", amount);
        config.stake.amount = Some(amount);
    }
    if args.dry_run {
        config.stake.dry_run = Some(true);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    let result = match build_engine(&config) {
        Ok(engine) => engine.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Staking failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        if e.is_retryable() {
            tracing::warn!("🔁 This error is transient; running again may succeed");
        }
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Network: {}", config.network());
    tracing::info!("  Address: {}", config.address());
    tracing::info!("  Amount: {} {}", config.amount(), config.asset_id());
    tracing::info!("  Platform: {}", config.platform_base_url());
    tracing::info!("  RPC: {}", config.rpc_url());
    if config.dry_run() {
        tracing::info!("  🔍 DRY RUN MODE ENABLED");
    }
}
