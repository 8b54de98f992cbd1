use crate::core::planner::Recommendation;
use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::PhaseMonitor;

#[derive(Debug, Clone)]
pub struct PlannerOutput {
    pub recommendation: Recommendation,
    pub report_path: Option<String>,
}

pub struct PlannerEngine<P: Pipeline> {
    pipeline: P,
    monitor: PhaseMonitor,
}

impl<P: Pipeline> PlannerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: PhaseMonitor::new(monitor_enabled),
        }
    }

    pub fn monitor(&self) -> &PhaseMonitor {
        &self.monitor
    }

    pub async fn run(&self) -> Result<PlannerOutput> {
        tracing::info!("Starting vendor planning run");

        // Extract
        let vendors = self.pipeline.extract().await?;
        tracing::info!("Loaded {} vendors", vendors.len());
        self.monitor.log_stats("Extract");

        // Transform
        let recommendation = self.pipeline.transform(vendors).await?;
        tracing::info!(
            "Selected {} vendors across {} available services",
            recommendation.selected.len(),
            recommendation.services.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        let report_path = self.pipeline.load(&recommendation).await?;
        if let Some(path) = &report_path {
            tracing::info!("Report saved to: {}", path);
        }
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(PlannerOutput {
            recommendation,
            report_path,
        })
    }
}
