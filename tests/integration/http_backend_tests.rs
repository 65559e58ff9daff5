/*!
 * Wire format tests against a local HTTP server
 */

use std::sync::Arc;

use axum::http::StatusCode;

use transrank::comparison::{ComparisonOrchestrator, RequestStatus};
use transrank::errors::ServiceError;
use transrank::service::http::HttpBackend;
use transrank::service::{CompareRequest, TranslateRequest, TranslationBackend};
use transrank::translation_service::TranslationService;

use crate::common::{direct_client, spawn_service};

#[tokio::test]
async fn test_compare_shouldPostMessageAndLanguage() {
    let (url, log) = spawn_service(StatusCode::OK).await.unwrap();
    let backend = HttpBackend::with_client(format!("{}/", url), direct_client());

    let response = backend.compare(&CompareRequest::new("Hello", "es")).await.unwrap();
    assert_eq!(response.gemini_translation, "gemini says Hello");
    assert_eq!(response.deepl_translation, "deepl says Hello");

    let requests = log.rate_requests.lock().unwrap().clone();
    assert_eq!(requests, vec![CompareRequest::new("Hello", "es")]);
}

#[tokio::test]
async fn test_orchestrator_overHttp_shouldFetchAndSaveRankings() {
    let (url, log) = spawn_service(StatusCode::OK).await.unwrap();
    let backend = Arc::new(HttpBackend::with_client(url, direct_client()));
    let orchestrator = ComparisonOrchestrator::new(backend);

    orchestrator.request_comparison("Good evening", "pl").await.unwrap();
    orchestrator.move_up(1);
    orchestrator.apply_rating("gemini", "6");
    assert_eq!(orchestrator.save_rankings().await.unwrap(), RequestStatus::Success);

    let saved = log.saved.lock().unwrap().clone();
    assert_eq!(saved.len(), 1);
    let rankings = &saved[0].rankings;
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings[0].model_name, "deepl");
    assert_eq!(rankings[0].translation_text, "deepl says Good evening");
    assert_eq!(rankings[0].rank, 1);
    assert_eq!(rankings[1].model_name, "gemini-1.5-pro");
    assert_eq!(rankings[1].rating.value(), 6);
    assert!(rankings.iter().all(|r| r.target_language == "pl"));
}

#[tokio::test]
async fn test_saveRankings_withServerError_shouldReturnApiError() {
    let (url, log) = spawn_service(StatusCode::INTERNAL_SERVER_ERROR).await.unwrap();
    let backend = HttpBackend::with_client(url.clone(), direct_client());

    let err = backend.save_rankings(&[]).await.unwrap_err();
    assert!(matches!(err, ServiceError::ApiError { status_code: 500, .. }));

    let orchestrator = ComparisonOrchestrator::new(Arc::new(HttpBackend::with_client(url, direct_client())));
    orchestrator.request_comparison("Hello", "es").await.unwrap();
    let before = orchestrator.state();
    let status = orchestrator.save_rankings().await.unwrap();
    assert!(status.error_message().is_some());
    assert_eq!(orchestrator.state(), before);
    assert!(log.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_translate_shouldPostModel() {
    let (url, log) = spawn_service(StatusCode::OK).await.unwrap();
    let backend = HttpBackend::with_client(url, direct_client());
    let service = TranslationService::new(Arc::new(backend));

    let text = service.translate("Hi", "sv", "gemini-1.5-flash").await.unwrap();
    assert_eq!(text, "Hi (gemini-1.5-flash)");

    let requests = log.translate_requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![TranslateRequest {
            language: "sv".to_string(),
            message: "Hi".to_string(),
            model: "gemini-1.5-flash".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_unreachableService_shouldReportFetchFailure() {
    // Bind then drop a listener so the port is closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::with_client(format!("http://{}", addr), direct_client());
    let err = backend.compare(&CompareRequest::new("Hello", "es")).await.unwrap_err();
    assert!(matches!(err, ServiceError::RequestFailed(_)));

    let orchestrator = ComparisonOrchestrator::new(Arc::new(backend));
    let outcome = orchestrator.request_comparison("Hello", "es").await.unwrap();
    assert!(matches!(outcome, transrank::comparison::RequestOutcome::Applied(RequestStatus::Error(_))));
    assert!(orchestrator.state().is_empty());
}
