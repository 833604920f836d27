/*!
 * Tests for error types and conversions
 */

use lexicon::errors::{AppError, CodecError, StoreError};

#[test]
fn test_storeError_missingId_shouldBeInvalidState() {
    let error = StoreError::missing_id("Word");
    assert!(matches!(error, StoreError::InvalidState(_)));
    assert_eq!(error.to_string(), "Invalid state: Word has no id");
}

#[test]
fn test_codecError_wrongFieldCount_shouldDisplayLine() {
    let error = CodecError::WrongFieldCount {
        expected: 5,
        found: 3,
        line: "a:b:c".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("expected 5"));
    assert!(display.contains("found 3"));
    assert!(display.contains("a:b:c"));
}

#[test]
fn test_codecError_wrongPartCount_shouldNameKind() {
    let error = CodecError::WrongPartCount {
        kind: "translation",
        part: "en".to_string(),
    };
    assert_eq!(error.to_string(), "Wrong translation format: en");
}

#[test]
fn test_appError_fromStoreError_shouldWrap() {
    let error: AppError = StoreError::TransactionFailed("disk full".to_string()).into();
    assert!(matches!(error, AppError::Store(_)));
    assert!(error.to_string().contains("disk full"));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert_eq!(error.to_string(), "Unknown error: something odd");
}
