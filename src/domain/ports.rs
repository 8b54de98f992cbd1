use crate::core::planner::{PlanRequest, Recommendation};
use crate::core::selector::SelectionLimits;
use crate::domain::model::Vendor;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn vendor_file(&self) -> &str;
    fn output_path(&self) -> Option<&str>;
    fn plan_request(&self) -> PlanRequest;
    fn selection_limits(&self) -> SelectionLimits;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Vendor>>;
    async fn transform(&self, vendors: Vec<Vendor>) -> Result<Recommendation>;
    /// Persists the recommendation and returns where it was written, if anywhere.
    async fn load(&self, recommendation: &Recommendation) -> Result<Option<String>>;
}
