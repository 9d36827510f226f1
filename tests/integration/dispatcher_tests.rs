//! Dispatcher challenge behavior against a mock resource server

use crate::common::{setup_test_logging, MockOauthSource};
use akx_auth::{ApiKeyCredential, ApiRequest, AuthContext, AuthError, RequestDispatcher};
use assert_matches::assert_matches;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dispatcher_with_key() -> RequestDispatcher {
    let context = Arc::new(AuthContext::new(Some(ApiKeyCredential::new(
        "k1", "s3cr3t",
    ))));
    RequestDispatcher::new(context)
}

#[tokio::test]
async fn test_success_response_passes_through() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("doc body"))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_with_key();
    let response = dispatcher
        .send(&ApiRequest::get(format!("{}/docs", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body, "doc body");
}

#[tokio::test]
async fn test_challenge_without_key_is_returned_unmodified() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(
            ResponseTemplate::new(412).insert_header("OAuth-Source", "http://auth.invalid/oauth"),
        )
        .expect(1)
        .mount(&server)
        .await;

    // The handshake component must never be invoked: any request to the
    // oauth source would fail this expectation.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .named("oauth source must not be called")
        .mount(&server)
        .await;

    let dispatcher = RequestDispatcher::new(Arc::new(AuthContext::unauthenticated()));
    let response = dispatcher
        .send(&ApiRequest::get(format!("{}/docs", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 412);
    assert_eq!(
        response.header("OAuth-Source"),
        Some("http://auth.invalid/oauth")
    );
}

#[tokio::test]
async fn test_challenge_without_oauth_source_header_fails() {
    setup_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(412))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_with_key();
    let err = dispatcher
        .send(&ApiRequest::get(format!("{}/docs", server.uri())))
        .await
        .unwrap_err();

    assert_matches!(err, AuthError::KeyExchangeFailure(_));
}

#[tokio::test]
async fn test_one_handshake_one_replay_even_when_replay_is_challenged() {
    setup_test_logging();
    let oauth = MockOauthSource::start("n0nce", "tok-123\n").await;

    // The protected endpoint challenges every attempt, fresh token or not.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(
            ResponseTemplate::new(412).insert_header("OAuth-Source", oauth.url().as_str()),
        )
        .expect(2) // the original attempt and exactly one replay
        .mount(&server)
        .await;

    let dispatcher = dispatcher_with_key();
    let err = dispatcher
        .send(&ApiRequest::get(format!("{}/docs", server.uri())))
        .await
        .unwrap_err();

    // The replayed challenge is a hard failure, not a second handshake:
    // the oauth source saw exactly one fetch and one submit.
    assert_matches!(err, AuthError::ReplayRejected { status: 412 });
    assert_eq!(oauth.server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_key_exchange_failure_when_oauth_source_errors() {
    setup_test_logging();

    let oauth = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&oauth)
        .await;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(412).insert_header(
            "OAuth-Source",
            format!("{}/oauth", oauth.uri()).as_str(),
        ))
        .expect(1) // terminal failure: the original request is not replayed
        .mount(&server)
        .await;

    let dispatcher = dispatcher_with_key();
    let err = dispatcher
        .send(&ApiRequest::get(format!("{}/docs", server.uri())))
        .await
        .unwrap_err();

    assert_matches!(err, AuthError::KeyExchangeFailure(_));
}

#[tokio::test]
async fn test_handshake_rejected_when_submission_is_refused() {
    setup_test_logging();
    let oauth = MockOauthSource::start_rejecting("n0nce", 403, "key revoked").await;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(
            ResponseTemplate::new(412).insert_header("OAuth-Source", oauth.url().as_str()),
        )
        .expect(1) // terminal failure: the original request is not replayed
        .mount(&server)
        .await;

    let dispatcher = dispatcher_with_key();
    let err = dispatcher
        .send(&ApiRequest::get(format!("{}/docs", server.uri())))
        .await
        .unwrap_err();

    assert_matches!(err, AuthError::HandshakeRejected { status: 403, .. });
}

#[tokio::test]
async fn test_bearer_token_attached_after_handshake() {
    setup_test_logging();
    let oauth = MockOauthSource::start("n0nce", "tok-123\n").await;

    let server = MockServer::start().await;

    // Replay with the fresh token succeeds; mounted first so it wins.
    Mock::given(method("GET"))
        .and(path("/docs"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("doc body"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(
            ResponseTemplate::new(412).insert_header("OAuth-Source", oauth.url().as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_with_key();
    let response = dispatcher
        .send(&ApiRequest::get(format!("{}/docs", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body, "doc body");
    assert_eq!(
        dispatcher.context().auth_header().await.as_deref(),
        Some("Bearer tok-123")
    );
}
