pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpMedalApi;
pub use config::DashboardConfig;
pub use core::{dashboard::Dashboard, projector::MedalViewProjector};
pub use utils::error::{DashboardError, Result};
