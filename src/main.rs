use clap::Parser;
use sigmoid_api::api::{self, AppState};
use sigmoid_api::core::ConfigProvider;
use sigmoid_api::utils::{logger, validation::Validate};
use sigmoid_api::{CliConfig, SigmoidService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入配置並套用命令列覆蓋
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the config file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.json_logs(), cli.verbose);

    tracing::info!("Starting sigmoid-api");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store = api::open_store(&config).await?;
    let service = SigmoidService::new(store)
        .with_sampler_defaults(config.sampler)
        .with_demo_config(config.demo);

    if let Err(e) = api::serve(&config, AppState::new(service)).await {
        tracing::error!("❌ Server failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    Ok(())
}
