/*!
 * Mock backend implementation for testing and offline demos.
 *
 * This module provides a backend that never touches the network:
 * - `MockBackend::working()` - Always succeeds with tagged translations
 * - `MockBackend::failing()` - Always fails with a service error
 * - `with_failing_saves()` - Comparisons succeed, submissions fail
 * - `with_compare_delays()` - Per-call delays to reorder responses
 * - `MockBehavior::Intermittent` - Fails every Nth call
 * - `MockBehavior::FailFirst` - Fails the first N calls, then recovers
 */

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{
    Ack, CompareRequest, CompareResponse, TranslateRequest, TranslateResponse, TranslationBackend,
};
use crate::comparison::submission::SubmissionRecord;
use crate::errors::ServiceError;

/// Behaviour mode for one kind of call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with an API error
    Failing,
    /// Fails every Nth call of its kind
    Intermittent { fail_every: usize },
    /// Fails the first `times` calls of its kind, then succeeds
    FailFirst { times: usize },
}

/// Backend that answers from memory
#[derive(Debug, Clone)]
pub struct MockBackend {
    compare_behavior: MockBehavior,
    save_behavior: MockBehavior,
    translate_behavior: MockBehavior,
    /// Delays consumed one per compare call, before the behaviour applies
    compare_delays: Arc<Mutex<VecDeque<u64>>>,
    /// Custom response generator (optional)
    compare_response: Option<fn(&CompareRequest) -> CompareResponse>,
    compare_calls: Arc<AtomicUsize>,
    save_calls: Arc<AtomicUsize>,
    translate_calls: Arc<AtomicUsize>,
    saved: Arc<Mutex<Vec<Vec<SubmissionRecord>>>>,
}

impl MockBackend {
    /// Create a mock where every kind of call follows `behavior`
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            compare_behavior: behavior,
            save_behavior: behavior,
            translate_behavior: behavior,
            compare_delays: Arc::new(Mutex::new(VecDeque::new())),
            compare_response: None,
            compare_calls: Arc::new(AtomicUsize::new(0)),
            save_calls: Arc::new(AtomicUsize::new(0)),
            translate_calls: Arc::new(AtomicUsize::new(0)),
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Comparisons and translations keep their behaviour, submissions fail
    pub fn with_failing_saves(mut self) -> Self {
        self.save_behavior = MockBehavior::Failing;
        self
    }

    /// Set the behaviour of save calls only
    pub fn with_save_behavior(mut self, behavior: MockBehavior) -> Self {
        self.save_behavior = behavior;
        self
    }

    /// Set the behaviour of translate calls only
    pub fn with_translate_behavior(mut self, behavior: MockBehavior) -> Self {
        self.translate_behavior = behavior;
        self
    }

    /// Set the behaviour of compare calls only
    pub fn with_compare_behavior(mut self, behavior: MockBehavior) -> Self {
        self.compare_behavior = behavior;
        self
    }

    /// Delay the next compare calls by these amounts, in call order
    pub fn with_compare_delays(self, delays_ms: impl IntoIterator<Item = u64>) -> Self {
        self.compare_delays.lock().extend(delays_ms);
        self
    }

    /// Set a custom compare response generator
    pub fn with_compare_response(mut self, generator: fn(&CompareRequest) -> CompareResponse) -> Self {
        self.compare_response = Some(generator);
        self
    }

    /// Number of compare calls received so far
    pub fn compare_calls(&self) -> usize {
        self.compare_calls.load(Ordering::SeqCst)
    }

    /// Number of save calls received so far, failed ones included
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    /// Number of translate calls received so far
    pub fn translate_calls(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }

    /// Every submission accepted so far
    pub fn saved_submissions(&self) -> Vec<Vec<SubmissionRecord>> {
        self.saved.lock().clone()
    }

    /// Default compare response: each model tags the message with its name and language
    pub fn tagged_response(request: &CompareRequest) -> CompareResponse {
        CompareResponse {
            gemini_translation: format!("[gemini:{}] {}", request.language, request.message),
            deepl_translation: format!("[deepl:{}] {}", request.language, request.message),
        }
    }

    fn behave(behavior: MockBehavior, call: &str, count: usize) -> Result<(), ServiceError> {
        match behavior {
            MockBehavior::Working => Ok(()),
            MockBehavior::Intermittent { fail_every } if fail_every > 0 && count % fail_every == 0 => {
                Err(ServiceError::ApiError {
                    status_code: 503,
                    message: format!("Simulated intermittent {} failure (request #{})", call, count),
                })
            }
            MockBehavior::Intermittent { .. } => Ok(()),
            MockBehavior::Failing => Err(ServiceError::ApiError {
                status_code: 500,
                message: format!("Simulated {} failure", call),
            }),
            MockBehavior::FailFirst { times } if count <= times => Err(ServiceError::RequestFailed(
                format!("Simulated {} outage (request #{})", call, count),
            )),
            MockBehavior::FailFirst { .. } => Ok(()),
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn compare(&self, request: &CompareRequest) -> Result<CompareResponse, ServiceError> {
        let count = self.compare_calls.fetch_add(1, Ordering::SeqCst) + 1;

        let delay = self.compare_delays.lock().pop_front();
        if let Some(delay_ms) = delay {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        Self::behave(self.compare_behavior, "compare", count)?;
        let generator = self.compare_response.unwrap_or(Self::tagged_response);
        Ok(generator(request))
    }

    async fn save_rankings(&self, records: &[SubmissionRecord]) -> Result<Ack, ServiceError> {
        let count = self.save_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Self::behave(self.save_behavior, "save", count)?;
        self.saved.lock().push(records.to_vec());
        Ok(Ack {
            status_code: 200,
            records: records.len(),
        })
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, ServiceError> {
        let count = self.translate_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Self::behave(self.translate_behavior, "translate", count)?;
        Ok(TranslateResponse {
            translated_text: format!("[{}:{}] {}", request.model, request.language, request.message),
        })
    }
}
