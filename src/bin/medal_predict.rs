use clap::Parser;
use medal_board::adapters::render;
use medal_board::config::toml_config::DashboardConfig;
use medal_board::core::dashboard::DEFAULT_PREDICTION_YEAR;
use medal_board::core::prediction::PredictionState;
use medal_board::core::ConfigProvider;
use medal_board::utils::error::ErrorSeverity;
use medal_board::utils::{logger, validation::Validate};
use medal_board::{Dashboard, DashboardError, HttpMedalApi};

#[derive(Parser)]
#[command(name = "medal-predict")]
#[command(about = "Ask the medal service to predict a country's medal count")]
struct Args {
    /// Country to predict for; defaults to the first country the service lists
    #[arg(long)]
    country: Option<String>,

    #[arg(long, default_value_t = DEFAULT_PREDICTION_YEAR)]
    year: i32,

    /// Base URL of the medal service (overrides the config file)
    #[arg(long)]
    api_base: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Print the prediction as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let mut config = match &args.config {
        Some(path) => match DashboardConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => DashboardConfig::default(),
    };
    if let Some(base) = &args.api_base {
        config.api.base = base.clone();
    }
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let api = HttpMedalApi::from_config(&config);
    let mut dashboard = Dashboard::new(api.clone(), api, config.projection());

    match &args.country {
        Some(country) => dashboard.select_country(country.clone()),
        None => {
            tracing::info!("No country given, using the first one the service lists");
            if let Err(e) = dashboard.load().await {
                if dashboard.selected_country().is_none() {
                    fail(&e);
                }
            }
        }
    }
    dashboard.set_year(args.year);

    let state = match dashboard.predict().await {
        Ok(state) => state.clone(),
        Err(e) => fail(&e),
    };

    match &state {
        PredictionState::Succeeded(prediction) if args.json => {
            println!("{}", serde_json::to_string_pretty(prediction)?);
        }
        PredictionState::Failed(_) => {
            eprintln!("❌ {}", render::render_prediction(&state));
            std::process::exit(2);
        }
        _ => println!("{}", render::render_prediction(&state)),
    }

    Ok(())
}

fn fail(e: &DashboardError) -> ! {
    tracing::error!("Prediction aborted: {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    let code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(code);
}
