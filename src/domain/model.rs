use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One country's medal summary, in the shape `/medals/summary` returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalRecord {
    pub country: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

impl MedalRecord {
    pub fn new(country: impl Into<String>, gold: u32, silver: u32, bronze: u32) -> Self {
        Self {
            country: country.into(),
            gold,
            silver,
            bronze,
            total: gold.saturating_add(silver).saturating_add(bronze),
        }
    }

    pub fn is_consistent(&self) -> bool {
        u64::from(self.gold) + u64::from(self.silver) + u64::from(self.bronze)
            == u64::from(self.total)
    }
}

/// All per-country records at one point in time. Input order carries no meaning.
pub type Snapshot = Vec<MedalRecord>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FilterSelection {
    #[default]
    All,
    Country(String),
}

impl FilterSelection {
    pub fn matches(&self, record: &MedalRecord) -> bool {
        match self {
            Self::All => true,
            Self::Country(country) => record.country == *country,
        }
    }
}

/// Only the exact text `All` selects every country; anything else names one.
impl FromStr for FilterSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(Self::All)
        } else {
            Ok(Self::Country(s.to_string()))
        }
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Country(country) => f.write_str(country),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderEntry {
    #[serde(flatten)]
    pub record: MedalRecord,
    /// Share of the normalization ceiling, clamped to 0..=100.
    pub percentage: u8,
}

impl LeaderEntry {
    /// Sweep of the donut indicator in degrees.
    pub fn donut_degrees(&self) -> f64 {
        f64::from(self.percentage) * 3.6
    }
}

/// Bar chart input. `labels[i]` always names the country behind `values[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub leaders: Vec<LeaderEntry>,
    pub table: Vec<MedalRecord>,
    pub chart: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub country_name: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}
