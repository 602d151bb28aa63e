use crate::domain::model::{Prediction, PredictionRequest, Snapshot};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Limits and ceiling the projector works with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionSettings {
    pub leader_count: usize,
    pub table_limit: usize,
    pub chart_limit: usize,
    pub donut_ceiling: f64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            leader_count: 3,
            table_limit: 10,
            chart_limit: 10,
            donut_ceiling: 3000.0,
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn projection(&self) -> ProjectionSettings;
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait MedalSource: Send + Sync {
    async fn countries(&self) -> Result<Vec<String>>;
    async fn medal_summary(&self) -> Result<Snapshot>;
}

#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction>;
}
