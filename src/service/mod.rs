/*!
 * Client side of the remote translation service.
 *
 * This module contains the wire types and the backend abstraction:
 * - `http`: reqwest client for the hosted service
 * - `mock`: in-process backend with scripted behaviour
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::comparison::candidate::{
    DEEPL_ID, DEEPL_MODEL, GEMINI_ID, GEMINI_MODEL, TranslationCandidate,
};
use crate::comparison::submission::SubmissionRecord;
use crate::errors::ServiceError;

/// Body of `POST /rate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareRequest {
    /// Target language code
    pub language: String,
    /// Source text
    pub message: String,
}

impl CompareRequest {
    pub fn new(message: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            message: message.into(),
        }
    }
}

/// Response of `POST /rate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub gemini_translation: String,
    pub deepl_translation: String,
}

impl CompareResponse {
    /// Candidates in service order: Gemini first, then DeepL
    pub fn into_candidates(self) -> Vec<TranslationCandidate> {
        vec![
            TranslationCandidate::new(GEMINI_ID, GEMINI_MODEL, self.gemini_translation),
            TranslationCandidate::new(DEEPL_ID, DEEPL_MODEL, self.deepl_translation),
        ]
    }
}

/// Body of `POST /save-rankings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRankingsRequest {
    pub rankings: Vec<SubmissionRecord>,
}

/// Body of `POST /translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub language: String,
    pub message: String,
    pub model: String,
}

/// Response of `POST /translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

/// Acknowledgement of an accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// HTTP status the service answered with
    pub status_code: u16,
    /// Number of records the service accepted
    pub records: usize,
}

/// Common trait for every way of reaching the translation service
///
/// Implementations must treat each call as one request: either the whole
/// payload is accepted or the call fails.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Fetch candidate translations of one text from several models
    async fn compare(&self, request: &CompareRequest) -> Result<CompareResponse, ServiceError>;

    /// Persist a ranked and rated set of candidates
    async fn save_rankings(&self, records: &[SubmissionRecord]) -> Result<Ack, ServiceError>;

    /// Translate one text with one model
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, ServiceError>;
}

pub mod http;
pub mod mock;
