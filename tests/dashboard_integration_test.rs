use anyhow::Result;
use httpmock::prelude::*;
use medal_board::adapters::render::{self, OutputFormat};
use medal_board::core::prediction::PredictionState;
use medal_board::core::{ConfigProvider, FilterSelection};
use medal_board::{Dashboard, DashboardConfig, HttpMedalApi};
use std::io::Write;
use tempfile::NamedTempFile;

fn mock_backend(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/countries");
        then.status(200).json_body(serde_json::json!({
            "countries": ["United States", "China", "Great Britain", "Russia", "Germany"]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/medals/summary");
        then.status(200).json_body(serde_json::json!([
            {"country": "Germany", "gold": 17, "silver": 10, "bronze": 15, "total": 42},
            {"country": "United States", "gold": 46, "silver": 37, "bronze": 38, "total": 121},
            {"country": "Russia", "gold": 19, "silver": 17, "bronze": 20, "total": 56},
            {"country": "China", "gold": 26, "silver": 18, "bronze": 26, "total": 70},
            {"country": "Great Britain", "gold": 27, "silver": 23, "bronze": 17, "total": 67}
        ]));
    });
}

fn config_for(server: &MockServer, extra: &str) -> Result<DashboardConfig> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        "[api]\nbase = \"{}\"\ntimeout_seconds = 5\n{}",
        server.base_url(),
        extra
    )?;
    Ok(DashboardConfig::from_file(file.path())?)
}

#[tokio::test]
async fn test_load_and_project_from_backend() -> Result<()> {
    let server = MockServer::start();
    mock_backend(&server);

    let config = config_for(&server, "[projection]\ntable_limit = 4\nchart_limit = 3\n")?;
    let api = HttpMedalApi::from_config(&config);
    let mut dashboard = Dashboard::new(api.clone(), api, config.projection());

    dashboard.load().await?;
    assert_eq!(dashboard.selected_country(), Some("United States"));

    let view = dashboard.view().clone();
    let leaders: Vec<_> = view.leaders.iter().map(|l| l.record.country.as_str()).collect();
    assert_eq!(leaders, vec!["United States", "China", "Great Britain"]);
    assert_eq!(view.leaders[0].percentage, 4); // 121 / 3000
    assert_eq!(view.table.len(), 4);
    assert_eq!(view.chart.labels, vec!["United States", "China", "Great Britain"]);
    assert_eq!(view.chart.values, vec![121, 70, 67]);

    dashboard.set_filter("Russia".parse()?);
    let view = dashboard.view();
    assert_eq!(view.table.len(), 1);
    assert_eq!(view.table[0].total, 56);
    // leaders and chart ignore the filter
    assert_eq!(view.chart.len(), 3);
    assert_eq!(view.leaders.len(), 3);

    dashboard.set_filter(FilterSelection::Country("Atlantis".to_string()));
    assert!(dashboard.view().table.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_exports_render_the_view() -> Result<()> {
    let server = MockServer::start();
    mock_backend(&server);

    let config = config_for(&server, "")?;
    let api = HttpMedalApi::from_config(&config);
    let mut dashboard = Dashboard::new(api.clone(), api, config.projection());
    dashboard.load().await?;

    let csv = render::render(dashboard.view(), OutputFormat::Csv)?;
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("country,gold,silver,bronze,total"));
    assert_eq!(lines.next(), Some("United States,46,37,38,121"));
    assert_eq!(csv.lines().count(), 6);

    let text = render::render(dashboard.view(), OutputFormat::Text)?;
    assert!(text.contains("Overall Medal Leaders"));
    assert!(text.contains("Top 5 Countries - Total Olympic Medals"));
    Ok(())
}

#[tokio::test]
async fn test_prediction_round_trip_and_failure() -> Result<()> {
    let server = MockServer::start();
    mock_backend(&server);
    let ok_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/predict")
            .json_body(serde_json::json!({"country_name": "United States", "year": 2016}));
        then.status(200)
            .json_body(serde_json::json!({"gold": 44, "silver": 36, "bronze": 35, "total": 115}));
    });
    let fail_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/predict")
            .json_body(serde_json::json!({"country_name": "China", "year": 2032}));
        then.status(422)
            .json_body(serde_json::json!({"detail": "Year outside training range"}));
    });

    let config = config_for(&server, "")?;
    let api = HttpMedalApi::from_config(&config);
    let mut dashboard = Dashboard::new(api.clone(), api, config.projection());
    dashboard.load().await?;
    let before = dashboard.view().clone();

    let state = dashboard.predict().await?.clone();
    assert!(matches!(state, PredictionState::Succeeded(ref p) if p.total == 115));
    ok_mock.assert();

    dashboard.select_country("China");
    dashboard.set_year(2032);
    dashboard.predict().await?;
    fail_mock.assert();
    assert_eq!(
        dashboard.prediction().error(),
        Some("Year outside training range")
    );
    assert!(dashboard.prediction().result().is_none());
    assert_eq!(dashboard.view(), &before);
    Ok(())
}

#[tokio::test]
async fn test_country_list_outage_still_shows_medals() -> Result<()> {
    let server = MockServer::start();
    let countries_mock = server.mock(|when, then| {
        when.method(GET).path("/countries");
        then.status(500);
    });
    let summary_mock = server.mock(|when, then| {
        when.method(GET).path("/medals/summary");
        then.status(200).json_body(serde_json::json!([
            {"country": "Jamaica", "gold": 6, "silver": 3, "bronze": 2, "total": 11}
        ]));
    });

    let config = config_for(&server, "")?;
    let api = HttpMedalApi::from_config(&config);
    let mut dashboard = Dashboard::new(api.clone(), api, config.projection());

    assert!(dashboard.load().await.is_err());
    countries_mock.assert();
    summary_mock.assert();

    assert!(dashboard.last_error().unwrap_or_default().contains("500"));
    assert!(dashboard.countries().is_empty());
    assert_eq!(dashboard.snapshot().len(), 1);
    let view = dashboard.view();
    assert_eq!(view.table.len(), 1);
    assert_eq!(view.leaders[0].record.country, "Jamaica");
    assert_eq!(view.chart.values, vec![11]);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_surfaces_message() {
    let config = DashboardConfig::from_toml_str("[api]\nbase = \"http://127.0.0.1:9\"\ntimeout_seconds = 2\n")
        .unwrap();
    let api = HttpMedalApi::from_config(&config);
    let mut dashboard = Dashboard::new(api.clone(), api, config.projection());

    assert!(dashboard.load().await.is_err());
    assert!(dashboard.last_error().is_some());
    assert!(dashboard.snapshot().is_empty());
    assert!(dashboard.view().table.is_empty());
}
