use clap::Parser;
use vendor_planner::adapters::load_vendors;
use vendor_planner::core::summary::render_summary;
use vendor_planner::core::ConfigProvider;
use vendor_planner::utils::{logger, validation::Validate};
use vendor_planner::{LocalStorage, PlannerEngine, RecommendationPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-planner")]
#[command(about = "Vendor planner driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "planner.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the budget from config
    #[arg(long)]
    budget: Option<u64>,

    /// Override the location filter from config
    #[arg(long)]
    location: Option<String>,

    /// Dry run - load and validate vendors without running selection
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

    // 初始化日誌
    if config.log_format() == Some("json") {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based vendor planner");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(budget) = args.budget {
        config.request.budget = budget;
        tracing::info!("🔧 Budget overridden to: {}", budget);
    }
    if let Some(location) = &args.location {
        config.request.location = Some(location.clone());
        tracing::info!("🔧 Location overridden to: {}", location);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No selection will be performed");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 Phase monitoring enabled");
    }

    let pipeline = RecommendationPipeline::new(LocalStorage::new("."), config);
    let engine = PlannerEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output) => {
            println!("{}", render_summary(&output.recommendation));
            if let Some(path) = output.report_path {
                println!("📁 Report saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Planning failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let request = config.plan_request();
    let limits = config.selection_limits();

    println!("📋 Configuration Summary:");
    println!("  Planner: {}", config.planner.name);
    if let Some(description) = &config.planner.description {
        println!("  Description: {}", description);
    }
    println!("  Vendors: {}", config.vendor_file());
    println!("  Event: {}", request.event_type);
    let location = if request.location.is_empty() {
        "(any)"
    } else {
        request.location.as_str()
    };
    println!("  Location: {}", location);
    println!("  Budget: ₹{}", request.budget);
    println!(
        "  Limits: {} categories, {} candidates",
        limits.max_categories, limits.max_candidates
    );
    println!("  Output: {}", config.output_path().unwrap_or("(none)"));
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let storage = LocalStorage::new(".");
    let vendors = load_vendors(&storage, config.vendor_file()).await?;
    let groups = config.plan_request().local_services(&vendors);

    println!(
        "🔍 Dry run: {} valid vendors, {} matching location, in {} services",
        vendors.len(),
        groups.vendor_count(),
        groups.len()
    );
    for (service, members) in groups.iter() {
        println!("  {}: {} vendors", service, members.len());
    }

    let limits = config.selection_limits();
    if groups.len() > limits.max_categories {
        println!(
            "⚠️  {} services exceed max_categories ({}); selection would fail",
            groups.len(),
            limits.max_categories
        );
    }
    Ok(())
}
