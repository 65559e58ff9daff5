/*!
 * Comparison request lifecycle.
 *
 * The orchestrator owns the current comparison snapshot, issues comparison
 * requests and applies their responses, and turns every remote failure into
 * a status value. Each request carries a generation number; only the response
 * to the most recently issued request is applied.
 */

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::candidate::ComparisonState;
use super::rating::{self, RatingOutcome};
use super::store::CandidateStore;
use super::submission::{SubmissionBuilder, SubmissionRecord};
use crate::errors::{ComparisonError, ServiceError};
use crate::service::{CompareRequest, CompareResponse, TranslationBackend};

/// Shown when the comparison inputs are incomplete
pub const MISSING_INPUT_MESSAGE: &str = "Please enter a message and select a language.";

/// Shown when fetching candidates fails
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch translations. Please try again.";

/// Shown when saving rankings fails
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save rankings. Please try again.";

/// Shown when there is nothing to save
pub const NOTHING_TO_SAVE_MESSAGE: &str = "There are no translations to save.";

/// Lifecycle of a remote request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    /// Failed, with a message for the user
    Error(String),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The user-facing message of a failed request
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Success => write!(f, "success"),
            Self::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// What happened to one comparison request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The response was the latest one and set this status
    Applied(RequestStatus),
    /// A newer request was issued before this one resolved; its response was dropped
    Superseded,
    /// The request was aborted through `cancel`
    Cancelled,
}

#[derive(Debug, Default)]
struct Lifecycle {
    generation: u64,
    status: RequestStatus,
}

/// Drives comparison requests and owns the candidate snapshot
#[derive(Debug)]
pub struct ComparisonOrchestrator {
    backend: Arc<dyn TranslationBackend>,
    store: CandidateStore,
    submissions: SubmissionBuilder,
    lifecycle: Mutex<Lifecycle>,
    submission_status: Mutex<RequestStatus>,
    cancelled: Notify,
}

impl ComparisonOrchestrator {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self {
            submissions: SubmissionBuilder::new(Arc::clone(&backend)),
            backend,
            store: CandidateStore::new(),
            lifecycle: Mutex::new(Lifecycle::default()),
            submission_status: Mutex::new(RequestStatus::Idle),
            cancelled: Notify::new(),
        }
    }

    /// Status of the latest comparison request
    pub fn status(&self) -> RequestStatus {
        self.lifecycle.lock().status.clone()
    }

    /// Status of the latest submission
    pub fn submission_status(&self) -> RequestStatus {
        self.submission_status.lock().clone()
    }

    /// Generation of the most recently issued request
    pub fn generation(&self) -> u64 {
        self.lifecycle.lock().generation
    }

    /// Snapshot of the current comparison
    pub fn state(&self) -> ComparisonState {
        self.store.snapshot()
    }

    /// Handle to the candidate store
    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    /// Fetch candidates for `source_text` in `target_language`.
    ///
    /// Missing input fails with a validation error before anything is sent and
    /// leaves the status as it was. Remote failures are reported through the
    /// returned status, never as an error, and leave the current candidates
    /// in place.
    pub async fn request_comparison(
        &self,
        source_text: &str,
        target_language: &str,
    ) -> Result<RequestOutcome, ComparisonError> {
        if source_text.trim().is_empty() || target_language.trim().is_empty() {
            return Err(ComparisonError::validation(MISSING_INPUT_MESSAGE));
        }

        // Registered before the generation is issued so a cancel in between is not lost.
        let cancelled = self.cancelled.notified();
        tokio::pin!(cancelled);

        let generation = self.begin_request();
        debug!("Comparison request #{} for language '{}'", generation, target_language);

        let request = CompareRequest::new(source_text, target_language);
        let result = tokio::select! {
            result = self.backend.compare(&request) => result,
            _ = &mut cancelled => {
                debug!("Comparison request #{} cancelled", generation);
                return Ok(RequestOutcome::Cancelled);
            }
        };

        Ok(self.complete_request(generation, source_text, target_language, result))
    }

    /// Abort the in-flight comparison, if any.
    ///
    /// Returns whether a request was loading. Late responses to the aborted
    /// request are dropped.
    pub fn cancel(&self) -> bool {
        let was_loading = {
            let mut lifecycle = self.lifecycle.lock();
            if lifecycle.status.is_loading() {
                lifecycle.generation += 1;
                lifecycle.status = RequestStatus::Idle;
                true
            } else {
                false
            }
        };

        if was_loading {
            info!("Comparison request cancelled");
            self.cancelled.notify_waiters();
        }
        was_loading
    }

    fn begin_request(&self) -> u64 {
        let mut lifecycle = self.lifecycle.lock();
        lifecycle.generation += 1;
        lifecycle.status = RequestStatus::Loading;
        lifecycle.generation
    }

    fn complete_request(
        &self,
        generation: u64,
        source_text: &str,
        target_language: &str,
        result: Result<CompareResponse, ServiceError>,
    ) -> RequestOutcome {
        let mut lifecycle = self.lifecycle.lock();
        if lifecycle.generation != generation {
            debug!(
                "Dropping stale response to request #{} (latest is #{})",
                generation, lifecycle.generation
            );
            return RequestOutcome::Superseded;
        }

        lifecycle.status = match result {
            Ok(response) => {
                let state = ComparisonState::new(source_text, target_language, response.into_candidates());
                info!("Loaded {} candidate translation(s) for '{}'", state.len(), target_language);
                self.store.replace(state);
                RequestStatus::Success
            }
            Err(e) => {
                warn!("Comparison request #{} failed: {}", generation, e);
                RequestStatus::Error(FETCH_FAILED_MESSAGE.to_string())
            }
        };

        RequestOutcome::Applied(lifecycle.status.clone())
    }

    /// Move the candidate at `position` one rank up and return the new snapshot
    pub fn move_up(&self, position: usize) -> ComparisonState {
        self.store.update(|state| {
            let next = state.move_up(position);
            (next.clone(), next)
        })
    }

    /// Move the candidate at `position` one rank down and return the new snapshot
    pub fn move_down(&self, position: usize) -> ComparisonState {
        self.store.update(|state| {
            let next = state.move_down(position);
            (next.clone(), next)
        })
    }

    /// Apply raw rating input to a candidate
    pub fn apply_rating(&self, candidate_id: &str, raw_input: &str) -> RatingOutcome {
        self.store.update(|state| rating::apply_rating(state, candidate_id, raw_input))
    }

    /// Records for the current snapshot
    pub fn build_submission(&self) -> Vec<SubmissionRecord> {
        self.submissions.build(&self.store.snapshot())
    }

    /// Submit the current ranking.
    ///
    /// The candidate snapshot is never modified by this call, whatever its
    /// result. A failed submission can be retried by calling this again.
    pub async fn save_rankings(&self) -> Result<RequestStatus, ComparisonError> {
        let records = self.build_submission();
        if records.is_empty() {
            return Err(ComparisonError::validation(NOTHING_TO_SAVE_MESSAGE));
        }

        *self.submission_status.lock() = RequestStatus::Loading;
        let status = match self.submissions.submit(&records).await {
            Ok(_) => RequestStatus::Success,
            Err(_) => RequestStatus::Error(SAVE_FAILED_MESSAGE.to_string()),
        };
        *self.submission_status.lock() = status.clone();
        Ok(status)
    }
}
