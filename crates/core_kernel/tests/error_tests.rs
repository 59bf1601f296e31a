//! Tests for core_kernel error types

use core_kernel::error::CoreError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("Missing config");

    match error {
        CoreError::Configuration(msg) => assert_eq!(msg, "Missing config"),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Validation error"));
    assert!(display.contains("Test error"));
}

#[test]
fn test_configuration_error_display() {
    let error = CoreError::configuration("base_nav must be positive");

    assert_eq!(error.to_string(), "Configuration error: base_nav must be positive");
}
