//! Derived views over a medal snapshot.
//!
//! Every operation here is a pure function of its arguments: the snapshot is
//! borrowed, never mutated, and never retained between calls. Ranking always
//! uses a stable descending sort on `total`, so countries with equal totals
//! keep their input order.

use crate::domain::model::{ChartSeries, DashboardView, FilterSelection, LeaderEntry, MedalRecord};
use crate::domain::ports::ProjectionSettings;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MedalViewProjector {
    settings: ProjectionSettings,
}

impl MedalViewProjector {
    pub fn new(settings: ProjectionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ProjectionSettings {
        &self.settings
    }

    /// All three projections with the configured limits.
    pub fn project(&self, snapshot: &[MedalRecord], filter: &FilterSelection) -> DashboardView {
        DashboardView {
            leaders: top_leaders(
                snapshot,
                self.settings.leader_count,
                self.settings.donut_ceiling,
            ),
            table: filtered_table(snapshot, filter, self.settings.table_limit),
            chart: chart_series(snapshot, self.settings.chart_limit),
        }
    }
}

/// The `n` highest totals, each paired with its share of `normalization_ceiling`.
pub fn top_leaders(
    snapshot: &[MedalRecord],
    n: usize,
    normalization_ceiling: f64,
) -> Vec<LeaderEntry> {
    ranked(snapshot.iter(), n)
        .into_iter()
        .map(|record| LeaderEntry {
            percentage: display_percentage(record.total, normalization_ceiling),
            record: record.clone(),
        })
        .collect()
}

/// Records passing `filter`, highest total first, at most `limit` of them.
pub fn filtered_table(
    snapshot: &[MedalRecord],
    filter: &FilterSelection,
    limit: usize,
) -> Vec<MedalRecord> {
    ranked(snapshot.iter().filter(|r| filter.matches(r)), limit)
        .into_iter()
        .cloned()
        .collect()
}

pub fn chart_series(snapshot: &[MedalRecord], limit: usize) -> ChartSeries {
    let top = ranked(snapshot.iter(), limit);
    ChartSeries {
        labels: top.iter().map(|r| r.country.clone()).collect(),
        values: top.iter().map(|r| r.total).collect(),
    }
}

/// `min(100, round(total / ceiling * 100))`, saturating at both ends.
pub fn display_percentage(total: u32, normalization_ceiling: f64) -> u8 {
    let pct = (f64::from(total) / normalization_ceiling * 100.0).round();
    // NaN casts to 0
    pct.clamp(0.0, 100.0) as u8
}

fn ranked<'a>(records: impl Iterator<Item = &'a MedalRecord>, limit: usize) -> Vec<&'a MedalRecord> {
    let mut sorted: Vec<&MedalRecord> = records.collect();
    // sort_by is stable
    sorted.sort_by(|a, b| b.total.cmp(&a.total));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, total: u32) -> MedalRecord {
        MedalRecord {
            country: country.to_string(),
            gold: total,
            silver: 0,
            bronze: 0,
            total,
        }
    }

    fn sample() -> Vec<MedalRecord> {
        vec![
            MedalRecord::new("USA", 5, 3, 2),
            MedalRecord::new("CHN", 4, 4, 4),
        ]
    }

    #[test]
    fn test_reference_example() {
        let snapshot = sample();

        let leaders = top_leaders(&snapshot, 1, 3000.0);
        assert_eq!(leaders.len(), 1);
        assert_eq!(leaders[0].record.country, "CHN");
        assert_eq!(leaders[0].percentage, 0);

        let table = filtered_table(&snapshot, &FilterSelection::All, 10);
        let countries: Vec<_> = table.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["CHN", "USA"]);

        let chart = chart_series(&snapshot, 10);
        assert_eq!(chart.labels, vec!["CHN", "USA"]);
        assert_eq!(chart.values, vec![12, 10]);
    }

    #[test]
    fn test_empty_snapshot_yields_empty_views() {
        let empty: Vec<MedalRecord> = Vec::new();
        assert!(top_leaders(&empty, 3, 3000.0).is_empty());
        assert!(filtered_table(&empty, &FilterSelection::All, 10).is_empty());
        assert!(filtered_table(&empty, &FilterSelection::Country("USA".into()), 10).is_empty());
        assert!(chart_series(&empty, 10).is_empty());
        assert_eq!(
            MedalViewProjector::default().project(&empty, &FilterSelection::All),
            DashboardView::default()
        );
    }

    #[test]
    fn test_leaders_bounded_sorted_and_clamped() {
        let snapshot = vec![
            record("A", 2500),
            record("B", 4000),
            record("C", 1499),
            record("D", 1500),
            record("E", 0),
        ];

        let leaders = top_leaders(&snapshot, 3, 3000.0);
        assert_eq!(leaders.len(), 3);
        assert!(leaders
            .windows(2)
            .all(|w| w[0].record.total >= w[1].record.total));
        assert!(leaders.iter().all(|l| l.percentage <= 100));

        let pct: Vec<u8> = leaders.iter().map(|l| l.percentage).collect();
        assert_eq!(pct, vec![100, 83, 50]);

        assert_eq!(top_leaders(&snapshot, 10, 3000.0).len(), snapshot.len());
        assert!(top_leaders(&snapshot, 0, 3000.0).is_empty());
    }

    #[test]
    fn test_display_percentage_rounding() {
        assert_eq!(display_percentage(12, 3000.0), 0);
        assert_eq!(display_percentage(15, 3000.0), 1); // 0.5 rounds up
        assert_eq!(display_percentage(1499, 3000.0), 50);
        assert_eq!(display_percentage(3000, 3000.0), 100);
        assert_eq!(display_percentage(9000, 3000.0), 100);
        assert_eq!(display_percentage(0, 3000.0), 0);
        assert_eq!(display_percentage(10, 0.0), 100);
        assert_eq!(display_percentage(0, 0.0), 0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let snapshot = vec![
            record("first", 7),
            record("big", 9),
            record("second", 7),
            record("third", 7),
        ];

        let table = filtered_table(&snapshot, &FilterSelection::All, 10);
        let countries: Vec<_> = table.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["big", "first", "second", "third"]);

        let chart = chart_series(&snapshot, 3);
        assert_eq!(chart.labels, vec!["big", "first", "second"]);

        let leaders = top_leaders(&snapshot, 4, 3000.0);
        assert_eq!(leaders[3].record.country, "third");
    }

    #[test]
    fn test_country_filter_does_not_assume_uniqueness() {
        let snapshot = vec![
            record("USA", 3),
            record("GBR", 50),
            record("USA", 10),
            record("USA", 3),
        ];

        let table = filtered_table(&snapshot, &FilterSelection::Country("USA".into()), 2);
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.country == "USA"));
        assert_eq!(table[0].total, 10);
        assert_eq!(table[1].total, 3);

        let missing = filtered_table(&snapshot, &FilterSelection::Country("FRA".into()), 10);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_all_filter_table_matches_chart_selection() {
        let snapshot: Vec<MedalRecord> = (0..25u32)
            .map(|i| record(&format!("C{}", i), (i * 37) % 11))
            .collect();

        let table = filtered_table(&snapshot, &FilterSelection::All, 10);
        let chart = chart_series(&snapshot, 10);

        assert_eq!(chart.labels.len(), chart.values.len());
        let table_labels: Vec<_> = table.iter().map(|r| r.country.clone()).collect();
        let table_values: Vec<_> = table.iter().map(|r| r.total).collect();
        assert_eq!(table_labels, chart.labels);
        assert_eq!(table_values, chart.values);
    }

    #[test]
    fn test_projection_is_idempotent_and_leaves_input_alone() {
        let snapshot = vec![record("B", 1), record("A", 5), record("C", 3)];
        let before = snapshot.clone();
        let projector = MedalViewProjector::new(ProjectionSettings {
            leader_count: 2,
            table_limit: 2,
            chart_limit: 3,
            donut_ceiling: 10.0,
        });

        let first = projector.project(&snapshot, &FilterSelection::All);
        let second = projector.project(&snapshot, &FilterSelection::All);

        assert_eq!(first, second);
        assert_eq!(snapshot, before);
        assert_eq!(first.leaders.len(), 2);
        assert_eq!(first.leaders[0].percentage, 50);
        assert_eq!(first.table.len(), 2);
        assert_eq!(first.chart.values, vec![5, 3, 1]);
    }
}
