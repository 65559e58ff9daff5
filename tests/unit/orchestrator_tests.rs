/*!
 * Tests for the comparison request lifecycle
 */

use std::time::Duration;

use transrank::comparison::orchestrator::{
    FETCH_FAILED_MESSAGE, MISSING_INPUT_MESSAGE, NOTHING_TO_SAVE_MESSAGE, SAVE_FAILED_MESSAGE,
};
use transrank::comparison::{RatingOutcome, RequestOutcome, RequestStatus};
use transrank::errors::ComparisonError;
use transrank::service::mock::{MockBackend, MockBehavior};

use crate::common::{candidate_ids, hola_backend, orchestrator_with};

#[tokio::test]
async fn test_requestComparison_withHolaResponse_shouldLoadTwoCandidates() {
    let orchestrator = orchestrator_with(&hola_backend());

    let outcome = orchestrator.request_comparison("Hello", "es").await.unwrap();
    assert_eq!(outcome, RequestOutcome::Applied(RequestStatus::Success));
    assert_eq!(orchestrator.status(), RequestStatus::Success);

    let state = orchestrator.state();
    assert_eq!(candidate_ids(&orchestrator), vec!["gemini", "deepl"]);
    assert_eq!(state.rating("gemini").map(|r| r.value()), Some(5));
    assert_eq!(state.rating("deepl").map(|r| r.value()), Some(5));
    assert_eq!(state.rank("gemini"), Some(1));
    assert_eq!(state.rank("deepl"), Some(2));
    assert_eq!(state.candidates()[0].content, "Hola");
    assert_eq!(state.candidates()[1].content, "Hola!");
}

#[tokio::test]
async fn test_requestComparison_withMissingInput_shouldFailWithoutRequest() {
    let backend = hola_backend();
    let orchestrator = orchestrator_with(&backend);

    let err = orchestrator.request_comparison("Hello", "").await.unwrap_err();
    assert!(matches!(err, ComparisonError::Validation(ref m) if m == MISSING_INPUT_MESSAGE));
    assert_eq!(orchestrator.status(), RequestStatus::Idle);
    assert_eq!(backend.compare_calls(), 0);
}

#[tokio::test]
async fn test_requestComparison_afterSuccess_withMissingInput_shouldKeepStatus() {
    let orchestrator = orchestrator_with(&hola_backend());
    orchestrator.request_comparison("Hello", "es").await.unwrap();

    assert!(orchestrator.request_comparison("", "es").await.is_err());
    assert_eq!(orchestrator.status(), RequestStatus::Success);
    assert_eq!(orchestrator.state().len(), 2);
}

#[tokio::test]
async fn test_requestComparison_withFailingBackend_shouldReportError() {
    let backend = MockBackend::failing();
    let orchestrator = orchestrator_with(&backend);

    let outcome = orchestrator.request_comparison("Hello", "es").await.unwrap();
    let expected = RequestStatus::Error(FETCH_FAILED_MESSAGE.to_string());
    assert_eq!(outcome, RequestOutcome::Applied(expected.clone()));
    assert_eq!(orchestrator.status(), expected);
    assert!(orchestrator.state().is_empty());
}

#[tokio::test]
async fn test_requestComparison_failureAfterSuccess_shouldKeepPreviousCandidates() {
    let backend = MockBackend::working()
        .with_compare_behavior(MockBehavior::Intermittent { fail_every: 2 });
    let orchestrator = orchestrator_with(&backend);

    orchestrator.request_comparison("Hello", "es").await.unwrap();
    orchestrator.move_down(0);
    orchestrator.apply_rating("deepl", "9");
    let before = orchestrator.state();

    let outcome = orchestrator.request_comparison("Goodbye", "fr").await.unwrap();
    assert!(matches!(outcome, RequestOutcome::Applied(RequestStatus::Error(_))));
    assert_eq!(orchestrator.state(), before);
}

#[tokio::test]
async fn test_requestComparison_afterEdits_shouldReplaceStateWithDefaults() {
    let orchestrator = orchestrator_with(&MockBackend::working());
    orchestrator.request_comparison("Hello", "es").await.unwrap();
    orchestrator.move_down(0);
    orchestrator.apply_rating("gemini", "2");

    orchestrator.request_comparison("Thanks", "de").await.unwrap();
    let state = orchestrator.state();
    assert_eq!(candidate_ids(&orchestrator), vec!["gemini", "deepl"]);
    assert_eq!(state.rating("gemini").map(|r| r.value()), Some(5));
    assert_eq!(state.candidates()[0].content, "[gemini:de] Thanks");
}

#[tokio::test]
async fn test_overlappingRequests_slowFirst_shouldApplyOnlyLatest() {
    let backend = MockBackend::working().with_compare_delays([120, 10]);
    let orchestrator = orchestrator_with(&backend);

    let (first, second) = tokio::join!(
        orchestrator.request_comparison("first", "es"),
        orchestrator.request_comparison("second", "es"),
    );

    assert_eq!(first.unwrap(), RequestOutcome::Superseded);
    assert_eq!(second.unwrap(), RequestOutcome::Applied(RequestStatus::Success));
    assert_eq!(orchestrator.state().source_text(), "second");
    assert_eq!(orchestrator.status(), RequestStatus::Success);
    assert_eq!(backend.compare_calls(), 2);
}

#[tokio::test]
async fn test_overlappingRequests_fastFirst_shouldStillApplyOnlyLatest() {
    let backend = MockBackend::working().with_compare_delays([10, 120]);
    let orchestrator = orchestrator_with(&backend);

    let (first, second) = tokio::join!(
        orchestrator.request_comparison("first", "es"),
        orchestrator.request_comparison("second", "es"),
    );

    assert_eq!(first.unwrap(), RequestOutcome::Superseded);
    assert_eq!(second.unwrap(), RequestOutcome::Applied(RequestStatus::Success));
    assert_eq!(orchestrator.state().source_text(), "second");
}

#[tokio::test]
async fn test_status_whileRequestInFlight_shouldBeLoading() {
    let backend = MockBackend::working().with_compare_delays([80]);
    let orchestrator = orchestrator_with(&backend);

    let (outcome, observed) = tokio::join!(
        orchestrator.request_comparison("Hello", "es"),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            orchestrator.status()
        },
    );

    assert_eq!(observed, RequestStatus::Loading);
    assert!(matches!(outcome.unwrap(), RequestOutcome::Applied(RequestStatus::Success)));
}

#[tokio::test]
async fn test_edits_whileRequestInFlight_shouldApplyToCurrentSnapshot() {
    let backend = hola_backend().with_compare_delays([0, 80]);
    let orchestrator = orchestrator_with(&backend);
    orchestrator.request_comparison("Hello", "es").await.unwrap();

    let (_, rated) = tokio::join!(
        orchestrator.request_comparison("Hello again", "es"),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            orchestrator.apply_rating("gemini", "8")
        },
    );

    assert_eq!(rated, RatingOutcome::Changed(transrank::Rating::clamped(8)));
    // The newer response replaces the edited snapshot
    assert_eq!(orchestrator.state().rating("gemini").map(|r| r.value()), Some(5));
    assert_eq!(orchestrator.state().source_text(), "Hello again");
}

#[tokio::test]
async fn test_cancel_whileLoading_shouldReturnToIdleAndKeepStore() {
    let backend = hola_backend().with_compare_delays([0, 200]);
    let orchestrator = orchestrator_with(&backend);
    orchestrator.request_comparison("Hello", "es").await.unwrap();
    let before = orchestrator.state();

    let (outcome, cancelled) = tokio::join!(
        orchestrator.request_comparison("Something else", "fr"),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            orchestrator.cancel()
        },
    );

    assert!(cancelled);
    assert_eq!(outcome.unwrap(), RequestOutcome::Cancelled);
    assert_eq!(orchestrator.status(), RequestStatus::Idle);
    assert_eq!(orchestrator.state(), before);
}

#[tokio::test]
async fn test_requestAfterCancel_shouldLoadNormally() {
    let backend = MockBackend::working().with_compare_delays([200]);
    let orchestrator = orchestrator_with(&backend);

    let (outcome, _) = tokio::join!(
        orchestrator.request_comparison("Hello", "es"),
        async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            orchestrator.cancel()
        },
    );
    assert_eq!(outcome.unwrap(), RequestOutcome::Cancelled);

    let outcome = orchestrator.request_comparison("Hello", "es").await.unwrap();
    assert_eq!(outcome, RequestOutcome::Applied(RequestStatus::Success));
    assert_eq!(orchestrator.state().len(), 2);
}

#[tokio::test]
async fn test_moveDown_onHolaScenario_shouldSwapRanksAndKeepRatings() {
    let backend = hola_backend();
    let orchestrator = orchestrator_with(&backend);
    orchestrator.request_comparison("Hello", "es").await.unwrap();

    orchestrator.move_down(0);
    assert_eq!(candidate_ids(&orchestrator), vec!["deepl", "gemini"]);

    let records = orchestrator.build_submission();
    assert_eq!(records[0].model_name, "deepl");
    assert_eq!(records[0].rank, 1);
    assert_eq!(records[1].model_name, "gemini-1.5-pro");
    assert_eq!(records[1].rank, 2);
    assert!(records.iter().all(|r| r.rating.value() == 5));
}

#[tokio::test]
async fn test_applyRating_onHolaScenario_shouldClampThenIgnoreGarbage() {
    let orchestrator = orchestrator_with(&hola_backend());
    orchestrator.request_comparison("Hello", "es").await.unwrap();

    let outcome = orchestrator.apply_rating("gemini", "15");
    assert_eq!(outcome, RatingOutcome::Changed(transrank::Rating::MAX));
    assert_eq!(orchestrator.state().rating("gemini").map(|r| r.value()), Some(10));

    let outcome = orchestrator.apply_rating("gemini", "abc");
    assert_eq!(outcome, RatingOutcome::Unchanged);
    assert_eq!(orchestrator.state().rating("gemini").map(|r| r.value()), Some(10));
}

#[tokio::test]
async fn test_saveRankings_withFailingBackend_shouldLeaveStateUntouched() {
    let backend = hola_backend().with_failing_saves();
    let orchestrator = orchestrator_with(&backend);
    orchestrator.request_comparison("Hello", "es").await.unwrap();
    orchestrator.move_down(0);
    orchestrator.apply_rating("deepl", "7");
    let before = orchestrator.state();

    let status = orchestrator.save_rankings().await.unwrap();
    let expected = RequestStatus::Error(SAVE_FAILED_MESSAGE.to_string());
    assert_eq!(status, expected);
    assert_eq!(orchestrator.submission_status(), expected);
    assert_eq!(orchestrator.state(), before);
    assert_eq!(orchestrator.status(), RequestStatus::Success);
}

#[tokio::test]
async fn test_saveRankings_shouldSubmitCurrentOrderAndRatings() {
    let backend = hola_backend();
    let orchestrator = orchestrator_with(&backend);
    orchestrator.request_comparison("Hello", "es").await.unwrap();
    orchestrator.move_up(1);
    orchestrator.apply_rating("gemini", "3");

    let status = orchestrator.save_rankings().await.unwrap();
    assert_eq!(status, RequestStatus::Success);

    let saved = backend.saved_submissions();
    assert_eq!(saved.len(), 1);
    let records = &saved[0];
    assert_eq!(records[0].model_name, "deepl");
    assert_eq!(records[0].translation_text, "Hola!");
    assert_eq!(records[1].rating.value(), 3);
    assert!(records.iter().all(|r| r.source_text == "Hello" && r.target_language == "es"));
}

#[tokio::test]
async fn test_saveRankings_retryAfterFailure_shouldSendCurrentOrder() {
    let backend = hola_backend().with_save_behavior(MockBehavior::FailFirst { times: 1 });
    let orchestrator = orchestrator_with(&backend);
    orchestrator.request_comparison("Hello", "es").await.unwrap();
    let before = orchestrator.state();

    let status = orchestrator.save_rankings().await.unwrap();
    assert_eq!(status, RequestStatus::Error(SAVE_FAILED_MESSAGE.to_string()));
    assert_eq!(orchestrator.state(), before);
    assert!(backend.saved_submissions().is_empty());

    orchestrator.move_down(0);
    let status = orchestrator.save_rankings().await.unwrap();
    assert_eq!(status, RequestStatus::Success);
    assert_eq!(orchestrator.submission_status(), RequestStatus::Success);
    assert_eq!(backend.save_calls(), 2);

    let saved = backend.saved_submissions();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0][0].model_name, "deepl");
    assert_eq!(saved[0][0].rank, 1);
    assert_eq!(saved[0][1].model_name, "gemini-1.5-pro");
}

#[tokio::test]
async fn test_saveRankings_withEmptyComparison_shouldFailValidation() {
    let backend = MockBackend::working();
    let orchestrator = orchestrator_with(&backend);

    let err = orchestrator.save_rankings().await.unwrap_err();
    assert_eq!(err.to_string(), NOTHING_TO_SAVE_MESSAGE);
    assert_eq!(backend.save_calls(), 0);
    assert_eq!(orchestrator.submission_status(), RequestStatus::Idle);
}
