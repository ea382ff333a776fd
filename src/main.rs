use clap::Parser;
use linked_collage::core::ConfigProvider;
use linked_collage::utils::error::ErrorSeverity;
use linked_collage::utils::{logger, validation::Validate};
use linked_collage::{CanvasHost, CliConfig, CollageEngine, CollageError, LocalStorage, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting linked-collage");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let exit_code = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            match TomlConfig::from_file(path) {
                Ok(config) => execute(config, &cli).await,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    1
                }
            }
        }
        None => execute(cli.to_placement_config(), &cli).await,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn execute<C: ConfigProvider + Validate>(config: C, cli: &CliConfig) -> i32 {
    // 驗證配置
    if let Err(e) = config.validate() {
        return fail(&e);
    }

    let engine = CollageEngine::new(LocalStorage::new(), config);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the document will not be touched");
        return match engine.dry_run().await {
            Ok(report) => {
                println!("{}", report.message());
                0
            }
            Err(e) => fail(&e),
        };
    }

    let mut host = match CanvasHost::open(&cli.document).await {
        Ok(host) => host,
        Err(e) => return fail(&e),
    };

    match engine.run(&mut host).await {
        Ok(outcome) => {
            if let Err(e) = host.save_active(&cli.document).await {
                return fail(&e);
            }
            tracing::info!("📁 Document saved to: {}", cli.document.display());
            println!("{}", outcome.report.message());
            0
        }
        Err(e) => fail(&e),
    }
}

/// 單一警示訊息，並依嚴重程度決定退出碼
fn fail(e: &CollageError) -> i32 {
    tracing::error!(
        "❌ Placement failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", e.user_friendly_message());

    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
