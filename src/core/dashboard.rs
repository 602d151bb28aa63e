use crate::core::prediction::{PredictionSlot, PredictionState};
use crate::core::projector::MedalViewProjector;
use crate::domain::model::{DashboardView, FilterSelection, PredictionRequest, Snapshot};
use crate::domain::ports::{MedalSource, Predictor, ProjectionSettings};
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use chrono::{DateTime, Utc};

pub const DEFAULT_PREDICTION_YEAR: i32 = 2016;
pub const MIN_PREDICTION_YEAR: i32 = 1896;
pub const MAX_PREDICTION_YEAR: i32 = 2100;

/// Dashboard session: the loaded data, the user's selections and the prediction slot.
pub struct Dashboard<S: MedalSource, P: Predictor> {
    source: S,
    predictor: P,
    projector: MedalViewProjector,
    countries: Vec<String>,
    snapshot: Snapshot,
    generation: u64,
    loaded_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
    filter: FilterSelection,
    selected_country: Option<String>,
    year: i32,
    prediction: PredictionSlot,
    memo: Option<(u64, FilterSelection, DashboardView)>,
}

impl<S: MedalSource, P: Predictor> Dashboard<S, P> {
    pub fn new(source: S, predictor: P, settings: ProjectionSettings) -> Self {
        Self {
            source,
            predictor,
            projector: MedalViewProjector::new(settings),
            countries: Vec::new(),
            snapshot: Vec::new(),
            generation: 0,
            loaded_at: None,
            last_error: None,
            filter: FilterSelection::All,
            selected_country: None,
            year: DEFAULT_PREDICTION_YEAR,
            prediction: PredictionSlot::new(),
            memo: None,
        }
    }

    /// Fetches countries and the medal summary concurrently. Each fetch that
    /// succeeds is applied; a failed one leaves its previous data in place.
    pub async fn load(&mut self) -> Result<()> {
        tracing::info!("Loading countries and medal summary");

        let (countries, snapshot) =
            tokio::join!(self.source.countries(), self.source.medal_summary());
        let mut failures = Vec::new();

        match countries {
            Ok(countries) => {
                tracing::info!("Loaded {} countries", countries.len());
                if self.selected_country.is_none() {
                    self.selected_country = countries.first().cloned();
                }
                self.countries = countries;
            }
            Err(e) => {
                tracing::error!("Failed to load countries: {}", e);
                failures.push(e);
            }
        }

        match snapshot {
            Ok(snapshot) => {
                tracing::info!("Loaded {} medal records", snapshot.len());
                self.snapshot = snapshot;
                self.generation += 1;
                self.loaded_at = Some(Utc::now());
            }
            Err(e) => {
                tracing::error!("Failed to load medal summary: {}", e);
                failures.push(e);
            }
        }

        if failures.is_empty() {
            self.last_error = None;
            return Ok(());
        }

        let message = failures
            .iter()
            .map(DashboardError::user_friendly_message)
            .collect::<Vec<_>>()
            .join("; ");
        self.last_error = Some(message);
        Err(failures.remove(0))
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterSelection) {
        tracing::debug!("Country filter set to {}", filter);
        self.filter = filter;
    }

    pub fn selected_country(&self) -> Option<&str> {
        self.selected_country.as_deref()
    }

    pub fn select_country(&mut self, country: impl Into<String>) {
        self.selected_country = Some(country.into());
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    pub fn prediction(&self) -> &PredictionSlot {
        &self.prediction
    }

    /// Projections for the current snapshot and filter, recomputed only when either changed.
    pub fn view(&mut self) -> &DashboardView {
        let stale = match &self.memo {
            Some((generation, filter, _)) => {
                *generation != self.generation || *filter != self.filter
            }
            None => true,
        };

        if stale {
            let view = self.projector.project(&self.snapshot, &self.filter);
            self.memo = Some((self.generation, self.filter.clone(), view));
        }

        let (_, _, view) = self
            .memo
            .get_or_insert_with(|| (0, FilterSelection::All, DashboardView::default()));
        view
    }

    /// Requests a prediction for the selected country and year.
    pub async fn predict(&mut self) -> Result<&PredictionState> {
        let country = self
            .selected_country
            .clone()
            .ok_or_else(|| DashboardError::MissingConfigError {
                field: "country".to_string(),
            })?;
        validate_non_empty_string("country", &country)?;
        validate_range("year", self.year, MIN_PREDICTION_YEAR, MAX_PREDICTION_YEAR)?;

        let request = PredictionRequest {
            country_name: country,
            year: self.year,
        };
        self.prediction.begin(request.clone())?;

        let guard = PendingGuard {
            slot: &mut self.prediction,
        };
        let outcome = self.predictor.predict(&request).await;
        guard.slot.resolve(outcome);
        drop(guard);

        Ok(self.prediction.state())
    }
}

/// Abandons the pending prediction if the `predict` future is dropped mid-request.
struct PendingGuard<'a> {
    slot: &'a mut PredictionSlot,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.slot.abandon();
    }
}
