use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::NotFound("test".into()), "NOT_FOUND")]
#[case(AppError::Validation("test".into()), "VALIDATION_ERROR")]
#[case(AppError::PayloadTooLarge("test".into()), "PAYLOAD_TOO_LARGE")]
#[case(AppError::Storage("test".into()), "STORAGE_ERROR")]
#[case(AppError::RecordStore("test".into()), "RECORD_STORE_ERROR")]
#[case(AppError::Configuration("test".into()), "CONFIGURATION_ERROR")]
#[case(AppError::Internal("test".into()), "INTERNAL_ERROR")]
fn test_app_error_error_codes(#[case] err: AppError, #[case] code: &str) {
    assert_eq!(err.error_code(), code);
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::NotFound("msg".into())),
        "Not found: msg"
    );
    assert_eq!(
        format!("{}", AppError::PayloadTooLarge("msg".into())),
        "Payload too large: msg"
    );
    assert_eq!(
        AppError::Storage("msg".into()).to_string(),
        "Storage error: msg"
    );
}

#[test]
fn test_client_errors() {
    assert!(AppError::Validation(String::new()).is_client_error());
    assert!(AppError::PayloadTooLarge(String::new()).is_client_error());
    assert!(!AppError::Storage(String::new()).is_client_error());
    assert!(!AppError::Internal(String::new()).is_client_error());
}

#[test]
fn test_from_config_error() {
    let err: AppError = config::ConfigError::NotFound("storage".into()).into();
    assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
}

#[test]
fn test_app_result_alias() {
    fn fails() -> AppResult<()> {
        Err(AppError::Internal("boom".into()))
    }
    assert!(fails().is_err());
}
