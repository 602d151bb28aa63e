use clap::Parser;
use medal_board::adapters::render;
use medal_board::core::ConfigProvider;
use medal_board::utils::error::{DashboardError, ErrorSeverity};
use medal_board::utils::{logger, validation::Validate};
use medal_board::{CliConfig, Dashboard, HttpMedalApi};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting medal-board");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Some(path) = &cli.output {
        if let Err(e) = medal_board::utils::validation::validate_path("output", path) {
            exit_with(&e);
        }
    }

    let api = HttpMedalApi::from_config(&config);
    let mut dashboard = Dashboard::new(api.clone(), api, config.projection());
    dashboard.set_filter(cli.filter.clone());

    if let Err(e) = dashboard.load().await {
        if dashboard.loaded_at().is_none() {
            exit_with(&e);
        }
        tracing::warn!("Showing medal data despite a partial load failure: {}", e);
        eprintln!("⚠️  {}", dashboard.last_error().unwrap_or_default());
    }

    let rendered = match render::render(dashboard.view(), cli.format) {
        Ok(text) => text,
        Err(e) => exit_with(&e),
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = tokio::fs::write(path, rendered).await {
                exit_with(&DashboardError::IoError(e));
            }
            tracing::info!("Output saved to: {}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn exit_with(e: &DashboardError) -> ! {
    tracing::error!(
        "medal-board failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
