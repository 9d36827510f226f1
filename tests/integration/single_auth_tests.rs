//! Single-use token fetch through the dispatcher

use crate::common::setup_test_logging;
use akx_auth::single_auth::{append_single_auth_token, fetch_single_auth_token};
use akx_auth::{AuthContext, RequestDispatcher};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_token_and_build_download_url() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fs/fs1/singleAuthToken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"Token": "tok-dl-1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = RequestDispatcher::new(Arc::new(AuthContext::unauthenticated()));
    let token = fetch_single_auth_token(
        &dispatcher,
        &format!("{}/fs/fs1/singleAuthToken", server.uri()),
    )
    .await
    .unwrap();
    assert_eq!(token, "tok-dl-1");

    let download_url =
        append_single_auth_token(&format!("{}/fs/fs1/files/report.pdf", server.uri()), &token)
            .unwrap();
    assert!(download_url.ends_with("/fs/fs1/files/report.pdf?singleUseAuthToken=tok-dl-1"));
}

#[tokio::test]
async fn test_fetch_token_surfaces_error_status() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/singleAuthToken"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = RequestDispatcher::new(Arc::new(AuthContext::unauthenticated()));
    let result = fetch_single_auth_token(
        &dispatcher,
        &format!("{}/singleAuthToken", server.uri()),
    )
    .await;

    assert!(result.is_err());
}
