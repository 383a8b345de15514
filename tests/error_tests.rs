// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use gardener_gateway::error::GatewayError;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        GatewayError::Config("missing origin".to_string()),
        GatewayError::Install("fetch of /logo.png returned 404".to_string()),
        GatewayError::CacheStorage("generation vanished".to_string()),
        GatewayError::QuotaStorage("disk full".to_string()),
        GatewayError::UploadLimit("3 per day".to_string()),
        GatewayError::Upstream("no reply received".to_string()),
        GatewayError::InvalidRequest("empty message".to_string()),
        GatewayError::Internal("poisoned state".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_upload_limit_error_names_the_policy() {
    let error = GatewayError::UploadLimit("3 per day".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Upload limit reached"));
    assert!(display.contains("3 per day"));
}

#[test]
fn test_install_error_carries_the_failing_path() {
    let error = GatewayError::Install("fetch of /logo.png returned 404".to_string());
    assert!(format!("{}", error).contains("/logo.png"));
}

#[test]
fn test_upstream_error() {
    let error = GatewayError::Upstream("Connection refused".to_string());
    assert!(format!("{}", error).contains("Connection refused"));
}

#[test]
fn test_invalid_request_error() {
    let error = GatewayError::InvalidRequest("unsupported media type image/tiff".to_string());
    assert!(format!("{}", error).contains("image/tiff"));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: GatewayError = io.into();
    assert!(matches!(error, GatewayError::Io(_)));
}
