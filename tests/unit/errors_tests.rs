/*!
 * Tests for error types and conversions
 */

use transrank::errors::{AppError, ComparisonError, ServiceError};

#[test]
fn test_serviceError_requestFailed_shouldDisplayCorrectly() {
    let error = ServiceError::RequestFailed("Connection refused".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection refused"));
}

#[test]
fn test_serviceError_parseError_shouldDisplayCorrectly() {
    let error = ServiceError::ParseError("missing field `deeplTranslation`".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Failed to parse API response"));
    assert!(display.contains("deeplTranslation"));
}

#[test]
fn test_serviceError_apiError_shouldDisplayStatusAndMessage() {
    let error = ServiceError::ApiError {
        status_code: 502,
        message: "Bad gateway".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("502"));
    assert!(display.contains("Bad gateway"));
}

#[test]
fn test_comparisonError_validation_shouldDisplayMessageVerbatim() {
    let error = ComparisonError::validation("Please enter a message and select a language.");
    assert_eq!(error.to_string(), "Please enter a message and select a language.");
    assert!(error.is_validation());
}

#[test]
fn test_comparisonError_fromServiceError_shouldWrapAndNotBeValidation() {
    let error: ComparisonError = ServiceError::RequestFailed("timeout".to_string()).into();
    assert!(matches!(error, ComparisonError::Service(ServiceError::RequestFailed(_))));
    assert!(!error.is_validation());
    assert!(error.to_string().contains("timeout"));
}

#[test]
fn test_appError_fromComparisonError_shouldPreserveMessage() {
    let error: AppError = ComparisonError::validation("There are no translations to save.").into();
    let display = error.to_string();
    assert!(display.starts_with("Comparison error"));
    assert!(display.contains("There are no translations to save."));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json missing");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(ref m) if m.contains("conf.json missing")));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref m) if m == "something odd"));
}

#[test]
fn test_appError_fromServiceError_shouldBeServiceVariant() {
    let error: AppError = ServiceError::ApiError { status_code: 500, message: "boom".to_string() }.into();
    assert!(matches!(error, AppError::Service(_)));
}
