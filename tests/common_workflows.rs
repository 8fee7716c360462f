//! Integration tests for common Tether workflows.
//!
//! These tests verify that the facade exposes what a service needs to set up
//! its outbound clients.

use std::time::Duration;

use tether::prelude::*;

// =============================================================================
// Factory Tests
// =============================================================================

#[test]
fn test_factory_from_shared_base_config() {
    let base = HttpClientConfig::builder()
        .timeout(Duration::from_secs(10))
        .default_header("x-service", "checkout")
        .build();
    let factory = ClientFactory::new(base);

    let client = factory.new_client("http://orders.internal", false).unwrap();
    assert_eq!(
        client.config().base_url.as_deref(),
        Some("http://orders.internal")
    );
    assert_eq!(client.config().timeout, Some(Duration::from_secs(10)));
    assert!(client.config().classify_responses);
    assert!(!client.config().follow_redirects);

    let blocking = factory
        .new_blocking_client("http://billing.internal", true)
        .unwrap();
    assert!(blocking.config().wiretap.enabled);
    assert_eq!(blocking.config().default_headers.len(), 1);
}

#[test]
fn test_customization_sees_factory_defaults() {
    let factory = ClientFactory::default();
    let client = factory
        .new_client_with(
            "http://orders.internal",
            |builder| {
                let seen = builder.clone().build();
                assert!(seen.classify_responses);
                assert!(seen.wiretap.enabled);
                builder.user_agent("checkout/1.0")
            },
            true,
        )
        .unwrap();

    assert_eq!(client.config().user_agent, "checkout/1.0");
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_error_kinds_map_back_to_statuses() {
    let kinds = [
        (ErrorKind::BadRequest("Bad Request".into()), 400),
        (ErrorKind::Unauthorized("Unauthorized".into()), 401),
        (ErrorKind::Forbidden("Forbidden".into()), 403),
        (ErrorKind::NotFound("Not Found".into()), 404),
        (
            ErrorKind::Found {
                location: "/next".into(),
            },
            302,
        ),
        (ErrorKind::Conflict("Conflict".into()), 409),
        (
            ErrorKind::UnprocessableEntity("Unprocessable Entity".into()),
            422,
        ),
        (ErrorKind::TooManyRequests("Too Many Requests".into()), 429),
        (
            ErrorKind::InternalServerError("Internal Server Error".into()),
            500,
        ),
    ];

    for (kind, status) in kinds {
        let err = HttpClientError::from(kind);
        assert_eq!(err.status_code(), Some(status));
    }
}

#[test]
fn test_classify_is_reexported() {
    let kind = tether::http_client::classify(StatusCode::IM_A_TEAPOT, &HeaderMap::new());
    assert!(matches!(kind, Some(ErrorKind::BadRequest(_))));
}

// =============================================================================
// Logging Tests
// =============================================================================

#[test]
fn test_log_config_with_wiretap() {
    let config = LogConfig::new()
        .level(LogLevel::Warn)
        .format(LogFormat::Json)
        .with_env_filter("warn")
        .with_wiretap(true);

    assert_eq!(
        config.directives(),
        format!("warn,{}=trace", tether::WIRETAP_TARGET)
    );
}
