/*!
 * Candidate translations and the comparison snapshot.
 */

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::rating::Rating;
use super::reorder;

/// Id of the Gemini candidate in a comparison response
pub const GEMINI_ID: &str = "gemini";

/// Model name reported for the Gemini candidate
pub const GEMINI_MODEL: &str = "gemini-1.5-pro";

/// Id of the DeepL candidate in a comparison response
pub const DEEPL_ID: &str = "deepl";

/// Model name reported for the DeepL candidate
pub const DEEPL_MODEL: &str = "deepl";

/// One model's translation of the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationCandidate {
    /// Stable identifier, unique within a comparison
    pub id: String,
    /// Name of the model that produced the translation
    pub model_name: String,
    /// The translated text
    pub content: String,
}

impl TranslationCandidate {
    pub fn new(id: impl Into<String>, model_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model_name: model_name.into(),
            content: content.into(),
        }
    }
}

/// An immutable snapshot of a comparison.
///
/// Candidate order defines rank (position + 1). Every candidate has exactly
/// one rating and no rating exists without a candidate. Transitions never
/// modify a snapshot in place; they return a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComparisonState {
    source_text: String,
    target_language: String,
    candidates: Vec<TranslationCandidate>,
    ratings: HashMap<String, Rating>,
}

impl ComparisonState {
    /// An empty comparison with no candidates
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a fresh comparison where every candidate starts at the default rating.
    ///
    /// Candidates with an id that already appeared earlier in the list are dropped.
    pub fn new(
        source_text: impl Into<String>,
        target_language: impl Into<String>,
        candidates: Vec<TranslationCandidate>,
    ) -> Self {
        let mut ratings = HashMap::with_capacity(candidates.len());
        let mut unique = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if ratings.insert(candidate.id.clone(), Rating::DEFAULT).is_none() {
                unique.push(candidate);
            }
        }

        Self {
            source_text: source_text.into(),
            target_language: target_language.into(),
            candidates: unique,
            ratings,
        }
    }

    /// Source text the candidates translate
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Target language the candidates were requested in
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Candidates in rank order
    pub fn candidates(&self) -> &[TranslationCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Current rating of a candidate
    pub fn rating(&self, candidate_id: &str) -> Option<Rating> {
        self.ratings.get(candidate_id).copied()
    }

    /// 1-based rank of a candidate
    pub fn rank(&self, candidate_id: &str) -> Option<usize> {
        self.candidates
            .iter()
            .position(|c| c.id == candidate_id)
            .map(|index| index + 1)
    }

    /// Candidates paired with their ratings, in rank order
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &TranslationCandidate, Rating)> + '_ {
        self.candidates.iter().enumerate().map(|(index, candidate)| {
            let rating = self.ratings.get(&candidate.id).copied().unwrap_or_default();
            (index + 1, candidate, rating)
        })
    }

    /// New snapshot with the candidate at `position` moved one place towards rank 1
    pub fn move_up(&self, position: usize) -> Self {
        Self {
            candidates: reorder::move_up(&self.candidates, position),
            ..self.clone()
        }
    }

    /// New snapshot with the candidate at `position` moved one place away from rank 1
    pub fn move_down(&self, position: usize) -> Self {
        Self {
            candidates: reorder::move_down(&self.candidates, position),
            ..self.clone()
        }
    }

    /// New snapshot with `rating` stored for `candidate_id`.
    ///
    /// Unknown ids leave the snapshot as it is.
    pub fn with_rating(&self, candidate_id: &str, rating: Rating) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.ratings.get_mut(candidate_id) {
            *slot = rating;
        }
        next
    }
}
