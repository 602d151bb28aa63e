pub mod dashboard;
pub mod prediction;
pub mod projector;

pub use crate::domain::model::{
    ChartSeries, DashboardView, FilterSelection, LeaderEntry, MedalRecord, Prediction,
    PredictionRequest, Snapshot,
};
pub use crate::domain::ports::{ConfigProvider, MedalSource, Predictor, ProjectionSettings};
pub use crate::utils::error::Result;
