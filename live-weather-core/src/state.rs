use crate::{Batch, FetchError, WeatherSnapshot};

/// Result of one fetch cycle, tagged with the cycle's sequence number.
#[derive(Debug)]
pub struct CycleOutcome {
    pub seq: u64,
    pub result: Result<Batch, FetchError>,
}

/// What `ViewState::apply` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// New batch is now displayed.
    Replaced,
    /// Cycle failed but an earlier batch is still shown.
    Swallowed,
    /// Cycle failed with nothing to show; the error is now displayed.
    Surfaced,
    /// Outcome is older than the one already applied and was dropped.
    Stale,
}

/// Everything the dashboard renders from. Refresh results and user
/// selection are the only ways it changes.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    batch: Batch,
    error: Option<String>,
    selected: String,
    applied_seq: Option<u64>,
}

impl ViewState {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self { selected: default_city.into(), ..Self::default() }
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Change the featured city. The name is not checked against the batch;
    /// an unknown name simply features the first city.
    pub fn select(&mut self, city: impl Into<String>) {
        self.selected = city.into();
    }

    pub fn apply(&mut self, outcome: CycleOutcome) -> Applied {
        if self.applied_seq.is_some_and(|applied| outcome.seq <= applied) {
            tracing::debug!(seq = outcome.seq, "dropping stale cycle result");
            return Applied::Stale;
        }
        self.applied_seq = Some(outcome.seq);

        match outcome.result {
            Ok(batch) => {
                self.batch = batch;
                self.error = None;
                tracing::info!(seq = outcome.seq, cities = self.batch.len(), "weather data updated");
                Applied::Replaced
            }
            Err(err) if !self.batch.is_empty() => {
                tracing::warn!(seq = outcome.seq, error = %err, "refresh failed, keeping previous data");
                Applied::Swallowed
            }
            Err(err) => {
                tracing::error!(seq = outcome.seq, error = %err, "error fetching weather data");
                self.error = Some(err.user_message().to_string());
                Applied::Surfaced
            }
        }
    }

    /// The selected city's snapshot, or the first one if it isn't in the batch.
    pub fn featured(&self) -> Option<&WeatherSnapshot> {
        self.batch.for_city(&self.selected).or_else(|| self.batch.first())
    }
}
