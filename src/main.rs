use clap::Parser;
use vendor_planner::core::planner::book_selected;
use vendor_planner::core::summary::{render_bookings, render_summary};
use vendor_planner::utils::{logger, validation::Validate};
use vendor_planner::{
    BookingSession, CliConfig, LocalStorage, PlannerEngine, RecommendationPipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting vendor-planner CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    let book = config.book_selected;

    let storage = LocalStorage::new(".");
    let pipeline = RecommendationPipeline::new(storage, config);
    let engine = PlannerEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output) => {
            println!("{}", render_summary(&output.recommendation));

            if book {
                let session = book_selected(
                    BookingSession::new(),
                    &output.recommendation,
                    chrono::Utc::now(),
                )?;
                println!("{}", render_bookings(&session));
            }

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
