/*!
 * Ranked submission records and their delivery.
 */

use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::candidate::ComparisonState;
use super::rating::Rating;
use crate::errors::ServiceError;
use crate::service::{Ack, TranslationBackend};

/// One candidate's rank and rating, as sent to the persistence endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub source_text: String,
    pub target_language: String,
    pub model_name: String,
    pub translation_text: String,
    /// 1-based position in the user's ordering
    pub rank: usize,
    pub rating: Rating,
}

/// Derive one record per candidate, ranked by current order
pub fn build_submission(
    state: &ComparisonState,
    source_text: &str,
    target_language: &str,
) -> Vec<SubmissionRecord> {
    state
        .ranked()
        .map(|(rank, candidate, rating)| SubmissionRecord {
            source_text: source_text.to_string(),
            target_language: target_language.to_string(),
            model_name: candidate.model_name.clone(),
            translation_text: candidate.content.clone(),
            rank,
            rating,
        })
        .collect()
}

/// Sends ranked records to the persistence endpoint
#[derive(Debug, Clone)]
pub struct SubmissionBuilder {
    backend: Arc<dyn TranslationBackend>,
}

impl SubmissionBuilder {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self { backend }
    }

    /// Records for a snapshot, using the text and language it was fetched for
    pub fn build(&self, state: &ComparisonState) -> Vec<SubmissionRecord> {
        build_submission(state, state.source_text(), state.target_language())
    }

    /// Forward the whole list in one request; there is no partial success
    pub async fn submit(&self, records: &[SubmissionRecord]) -> Result<Ack, ServiceError> {
        match self.backend.save_rankings(records).await {
            Ok(ack) => {
                info!("Saved {} ranking(s)", ack.records);
                Ok(ack)
            }
            Err(e) => {
                warn!("Failed to save {} ranking(s): {}", records.len(), e);
                Err(e)
            }
        }
    }
}
