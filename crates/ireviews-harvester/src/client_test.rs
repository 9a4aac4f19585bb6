use super::*;

#[test]
fn ok_is_success() {
    assert_eq!(classify_status(StatusCode::OK), StatusClass::Success);
}

#[test]
fn forbidden_is_soft_stop() {
    assert_eq!(classify_status(StatusCode::FORBIDDEN), StatusClass::SoftStop);
}

#[test]
fn other_statuses_are_fatal() {
    for status in [
        StatusCode::NO_CONTENT,
        StatusCode::MOVED_PERMANENTLY,
        StatusCode::NOT_FOUND,
        StatusCode::TOO_MANY_REQUESTS,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::SERVICE_UNAVAILABLE,
    ] {
        assert_eq!(classify_status(status), StatusClass::Fatal, "{status}");
    }
}

#[test]
fn new_strips_trailing_slash_from_base_url() {
    let config = HarvesterConfig {
        feed_base_url: "https://itunes.apple.com/".to_owned(),
        ..HarvesterConfig::default()
    };
    let client = FeedClient::new(&config).unwrap();
    assert_eq!(client.base_url(), "https://itunes.apple.com");
}

#[test]
fn new_rejects_unparseable_base_url() {
    let config = HarvesterConfig {
        feed_base_url: "not a url".to_owned(),
        ..HarvesterConfig::default()
    };
    let err = FeedClient::new(&config).unwrap_err();
    assert!(
        matches!(err, HarvestError::InvalidBaseUrl { .. }),
        "expected InvalidBaseUrl, got: {err:?}"
    );
}
