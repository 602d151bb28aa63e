//! Terminal and export renderings of a [`DashboardView`].

use crate::core::prediction::PredictionState;
use crate::domain::model::{ChartSeries, DashboardView, LeaderEntry, MedalRecord};
use crate::utils::error::{DashboardError, Result};
use std::fmt::Write as _;

const LEADER_BAR_WIDTH: usize = 20;
const CHART_BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "table" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "Unsupported format '{}'. Valid formats: text, json, csv",
                other
            )),
        }
    }
}

pub fn render(view: &DashboardView, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(view)),
        OutputFormat::Json => to_json(view),
        OutputFormat::Csv => table_to_csv(&view.table),
    }
}

pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str("Overall Medal Leaders\n");
    out.push_str(&render_leaders(&view.leaders));
    out.push('\n');
    let _ = writeln!(out, "Total Medals by Country (Top {})", view.table.len());
    out.push_str(&render_table(&view.table));
    out.push('\n');
    out.push_str(&render_chart(&view.chart));
    out
}

pub fn render_leaders(leaders: &[LeaderEntry]) -> String {
    if leaders.is_empty() {
        return "  (no data)\n".to_string();
    }

    let mut out = String::new();
    for (rank, leader) in leaders.iter().enumerate() {
        let record = &leader.record;
        let filled = usize::from(leader.percentage) * LEADER_BAR_WIDTH / 100;
        let _ = writeln!(
            out,
            "  {}. {:<20} {:>6}  [{}{}] {:>3}%  G {} / S {} / B {}",
            rank + 1,
            record.country,
            record.total,
            "#".repeat(filled),
            ".".repeat(LEADER_BAR_WIDTH - filled),
            leader.percentage,
            record.gold,
            record.silver,
            record.bronze
        );
    }
    out
}

pub fn render_table(rows: &[MedalRecord]) -> String {
    let width = rows
        .iter()
        .map(|r| r.country.chars().count())
        .max()
        .unwrap_or(0)
        .max("Country".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$} | {:>6} | {:>6} | {:>6} | {:>6}",
        "Country", "Gold", "Silver", "Bronze", "Total"
    );
    let _ = writeln!(out, "{}", "-".repeat(width + 36));
    for row in rows {
        let _ = writeln!(
            out,
            "{:<width$} | {:>6} | {:>6} | {:>6} | {:>6}",
            row.country, row.gold, row.silver, row.bronze, row.total
        );
    }
    out
}

/// Horizontal bars scaled against the largest value.
pub fn render_chart(chart: &ChartSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Top {} Countries - Total Olympic Medals",
        chart.len()
    );

    let max = chart.values.iter().copied().max().unwrap_or(0);
    let width = chart
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in chart.iter() {
        let bar = if max == 0 {
            0
        } else {
            (u64::from(value) * CHART_BAR_WIDTH as u64 / u64::from(max)) as usize
        };
        let _ = writeln!(out, "  {:<width$} {} {}", label, "█".repeat(bar), value);
    }
    out
}

pub fn render_prediction(state: &PredictionState) -> String {
    match state {
        PredictionState::Idle => "Select a country and year.".to_string(),
        PredictionState::Pending { request } => format!(
            "Predicting {} ({})...",
            request.country_name, request.year
        ),
        PredictionState::Succeeded(p) => format!(
            "{} medals predicted (gold {}, silver {}, bronze {})",
            p.total, p.gold, p.silver, p.bronze
        ),
        PredictionState::Failed(message) => message.clone(),
    }
}

pub fn to_json(view: &DashboardView) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

pub fn table_to_csv(rows: &[MedalRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["country", "gold", "silver", "bronze", "total"])?;
    for row in rows {
        writer.serialize((&row.country, row.gold, row.silver, row.bronze, row.total))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| DashboardError::SnapshotError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}
