use crate::domain::model::{Prediction, PredictionRequest};
use crate::utils::error::{DashboardError, Result};

pub const DEFAULT_FAILURE_MESSAGE: &str = "Prediction failed";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PredictionState {
    #[default]
    Idle,
    Pending {
        request: PredictionRequest,
    },
    Succeeded(Prediction),
    Failed(String),
}

/// Single in-flight prediction slot. Only one request may be pending at a time.
#[derive(Debug, Clone, Default)]
pub struct PredictionSlot {
    state: PredictionState,
}

impl PredictionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PredictionState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, PredictionState::Pending { .. })
    }

    pub fn result(&self) -> Option<&Prediction> {
        match &self.state {
            PredictionState::Succeeded(prediction) => Some(prediction),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            PredictionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Clears any previous outcome and marks `request` as in flight.
    pub fn begin(&mut self, request: PredictionRequest) -> Result<()> {
        if self.is_pending() {
            tracing::warn!(
                "Rejecting prediction for {} ({}): another request is pending",
                request.country_name,
                request.year
            );
            return Err(DashboardError::PredictionInFlight);
        }

        tracing::debug!(
            "Prediction pending for {} ({})",
            request.country_name,
            request.year
        );
        self.state = PredictionState::Pending { request };
        Ok(())
    }

    pub fn resolve(&mut self, outcome: Result<Prediction>) -> &PredictionState {
        if !self.is_pending() {
            tracing::warn!("Ignoring prediction outcome: no request is pending");
            return &self.state;
        }

        self.state = match outcome {
            Ok(prediction) => {
                tracing::info!("Prediction succeeded: {} medals", prediction.total);
                PredictionState::Succeeded(prediction)
            }
            Err(e) => {
                let message = failure_message(&e);
                tracing::warn!("Prediction failed: {}", e);
                PredictionState::Failed(message)
            }
        };
        &self.state
    }

    /// Fails a request whose outcome will never arrive, freeing the slot.
    pub fn abandon(&mut self) {
        if let PredictionState::Pending { request } = &self.state {
            tracing::warn!(
                "Prediction for {} ({}) was cancelled before it completed",
                request.country_name,
                request.year
            );
            self.state = PredictionState::Failed(DEFAULT_FAILURE_MESSAGE.to_string());
        }
    }
}

/// Backend `detail` when there is one, otherwise the error text.
pub fn failure_message(error: &DashboardError) -> String {
    let message = match error {
        DashboardError::PredictionRejected { detail, .. } => detail.clone(),
        other => other.user_friendly_message(),
    };

    if message.trim().is_empty() {
        DEFAULT_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}
