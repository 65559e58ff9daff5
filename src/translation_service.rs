/*!
 * Single-model translation.
 *
 * Translates one text with one chosen model, outside the comparison flow,
 * and keeps a count of successful translations per target language.
 */

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};
use parking_lot::Mutex;

use crate::comparison::RequestStatus;
use crate::errors::ComparisonError;
use crate::service::{TranslateRequest, TranslationBackend};

/// Shown when the text is missing
pub const MISSING_MESSAGE: &str = "Please enter a message";

/// Shown when the language is missing
pub const MISSING_LANGUAGE: &str = "Please select a language";

/// Shown when the model is missing
pub const MISSING_MODEL: &str = "Please select a translation model";

/// Shown when the service fails
pub const TRANSLATION_FAILED_MESSAGE: &str = "Translation failed. Please try again.";

/// A selectable translation model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    /// Display name
    pub label: &'static str,
    /// Identifier sent to the service
    pub id: &'static str,
}

/// Models the service can translate with
pub const TRANSLATION_MODELS: &[ModelOption] = &[
    ModelOption { label: "GPT-3.5 Turbo", id: "gpt-3.5-turbo" },
    ModelOption { label: "GPT-4", id: "gpt-4o" },
    ModelOption { label: "Gemini 1.5 Pro", id: "gemini-1.5-pro" },
    ModelOption { label: "Gemini 1.5 Flash", id: "gemini-1.5-flash" },
    ModelOption { label: "Gemini 1.5 Pro 2", id: "gemini-1.5-pro-002" },
    ModelOption { label: "Gemini 1.5 Flash 2", id: "gemini-1.5-flash-002" },
    ModelOption { label: "DeepL", id: "deepl" },
];

/// Find a model by identifier
pub fn find_model(id: &str) -> Option<&'static ModelOption> {
    let id = id.trim();
    TRANSLATION_MODELS.iter().find(|model| model.id == id)
}

/// Translation of one text with one model
#[derive(Debug)]
pub struct TranslationService {
    backend: Arc<dyn TranslationBackend>,
    status: Mutex<RequestStatus>,
    language_stats: Mutex<HashMap<String, usize>>,
}

impl TranslationService {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self {
            backend,
            status: Mutex::new(RequestStatus::Idle),
            language_stats: Mutex::new(HashMap::new()),
        }
    }

    /// Status of the latest translation
    pub fn status(&self) -> RequestStatus {
        self.status.lock().clone()
    }

    /// Successful translations per target language
    pub fn language_stats(&self) -> HashMap<String, usize> {
        self.language_stats.lock().clone()
    }

    /// Check the inputs in the order the user fills them in
    pub fn validate(message: &str, language: &str, model: &str) -> Result<(), ComparisonError> {
        if message.trim().is_empty() {
            return Err(ComparisonError::validation(MISSING_MESSAGE));
        }
        if language.trim().is_empty() {
            return Err(ComparisonError::validation(MISSING_LANGUAGE));
        }
        if model.trim().is_empty() {
            return Err(ComparisonError::validation(MISSING_MODEL));
        }
        Ok(())
    }

    /// Translate `message` into `language` with `model`
    pub async fn translate(&self, message: &str, language: &str, model: &str) -> Result<String, ComparisonError> {
        Self::validate(message, language, model)?;

        *self.status.lock() = RequestStatus::Loading;
        let request = TranslateRequest {
            language: language.to_string(),
            message: message.to_string(),
            model: model.to_string(),
        };

        match self.backend.translate(&request).await {
            Ok(response) => {
                *self.language_stats.lock().entry(language.to_string()).or_insert(0) += 1;
                *self.status.lock() = RequestStatus::Success;
                info!("Translated {} character(s) into '{}' with {}", message.chars().count(), language, model);
                Ok(response.translated_text)
            }
            Err(e) => {
                warn!("Translation with {} failed: {}", model, e);
                *self.status.lock() = RequestStatus::Error(TRANSLATION_FAILED_MESSAGE.to_string());
                Err(ComparisonError::Service(e))
            }
        }
    }
}
