/*!
 * Comparison and ranking of candidate translations.
 *
 * This module is organized in these parts:
 * - `candidate`: candidate translations and the immutable comparison snapshot
 * - `reorder`: single-step moves over a ranked sequence
 * - `rating`: parsing and clamping of user ratings
 * - `store`: shared owner of the current snapshot
 * - `submission`: ranked records and their delivery
 * - `orchestrator`: request lifecycle tying the parts together
 */

pub mod candidate;
pub mod orchestrator;
pub mod rating;
pub mod reorder;
pub mod store;
pub mod submission;

pub use candidate::{ComparisonState, TranslationCandidate};
pub use orchestrator::{ComparisonOrchestrator, RequestOutcome, RequestStatus};
pub use rating::{Rating, RatingOutcome};
pub use reorder::Direction;
pub use store::CandidateStore;
pub use submission::{SubmissionBuilder, SubmissionRecord, build_submission};
