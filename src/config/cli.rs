use crate::adapters::render::OutputFormat;
use crate::config::toml_config::DashboardConfig;
use crate::domain::model::FilterSelection;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "medal-board")]
#[command(about = "Olympic medal statistics from the medal service, in the terminal")]
pub struct CliConfig {
    /// Base URL of the medal service (overrides the config file)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Country to show in the table, or "All"
    #[arg(long, default_value = "All")]
    pub filter: FilterSelection,

    #[arg(long)]
    pub leaders: Option<usize>,

    #[arg(long)]
    pub table_limit: Option<usize>,

    #[arg(long)]
    pub chart_limit: Option<usize>,

    #[arg(long)]
    pub donut_ceiling: Option<f64>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Output format: text, json or csv
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the config file, if any, then applies command line overrides.
    pub fn resolve(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                DashboardConfig::from_file(path)?
            }
            None => DashboardConfig::default(),
        };

        if let Some(base) = &self.api_base {
            config.api.base = base.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.api.timeout_seconds = Some(timeout);
        }
        if let Some(n) = self.leaders {
            config.projection.leader_count = Some(n);
        }
        if let Some(limit) = self.table_limit {
            config.projection.table_limit = Some(limit);
        }
        if let Some(limit) = self.chart_limit {
            config.projection.chart_limit = Some(limit);
        }
        if let Some(ceiling) = self.donut_ceiling {
            config.projection.donut_ceiling = Some(ceiling);
        }

        Ok(config)
    }
}
