//! Mock-server tests for the route guard running over the real client.
//!
//! The guard's own logic is unit-tested in sewa-core against stub
//! verifiers; these tests pin down the full path through the HTTP
//! client, including the silent refresh underneath a session check.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sewa_core::notice::SESSION_EXPIRED_MESSAGE;
use sewa_core::{ApiUrl, Gate, Location, Notices, RouteContext, Verification};
use sewa_http::ApiClient;

fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(&format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn client_at(server: &MockServer, screen: &str) -> ApiClient {
    ApiClient::new(mock_api_url(server), Arc::new(Location::new(screen)))
}

fn check_auth_live() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "data": {"id": "u1", "name": "Alice", "email": "alice@example.com"}
    }))
}

#[tokio::test]
async fn test_live_session_renders_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/check-auth"))
        .respond_with(check_auth_live())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_at(&server, "/dashboard");
    let gate = client
        .guard()
        .gate(&RouteContext::new("/dashboard"), || "dashboard-props")
        .await;

    assert_eq!(gate, Gate::Content("dashboard-props"));
}

#[tokio::test]
async fn test_rejected_session_redirects_with_current_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/check-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let client = client_at(&server, "/inventory");
    let state = client
        .guard()
        .verify(&RouteContext::new("/inventory"))
        .await;

    assert_eq!(
        state,
        Verification::Unauthenticated {
            redirect: "/auth?redirect=%2Finventory".to_string()
        }
    );
    assert!(client.toasts().take().is_none());
}

#[tokio::test]
async fn test_session_out_on_verify_queues_notice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/check-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "sessionOut": true
        })))
        .mount(&server)
        .await;

    let client = client_at(&server, "/dashboard");
    let state = client
        .guard()
        .verify(&RouteContext::new("/dashboard"))
        .await;

    assert!(matches!(state, Verification::Unauthenticated { .. }));
    let notice = client.toasts().take().unwrap();
    assert_eq!(notice.message, SESSION_EXPIRED_MESSAGE);
}

#[tokio::test]
async fn test_supplied_redirect_survives_verification() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/check-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let client = client_at(&server, "/inventory");
    let route = RouteContext::parse("/inventory?redirect=/foo");
    let state = client.guard().verify(&route).await;

    assert_eq!(
        state,
        Verification::Unauthenticated {
            redirect: "/auth?redirect=%2Ffoo".to_string()
        }
    );
}

#[tokio::test]
async fn test_transport_failure_resolves_unauthenticated() {
    // Nothing is listening here; the check fails at the socket.
    let base = ApiUrl::new("http://127.0.0.1:1").unwrap();
    let client = ApiClient::new(base, Arc::new(Location::new("/orders")));

    let state = client.guard().verify(&RouteContext::new("/orders")).await;

    assert_eq!(
        state,
        Verification::Unauthenticated {
            redirect: "/auth?redirect=%2Forders".to_string()
        }
    );
}

#[tokio::test]
async fn test_verification_rides_the_refresh_cycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/check-auth"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Access token expired"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/check-auth"))
        .respond_with(check_auth_live())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_at(&server, "/dashboard");
    let state = client
        .guard()
        .verify(&RouteContext::new("/dashboard"))
        .await;

    assert_eq!(state, Verification::Authenticated);
}

#[tokio::test]
async fn test_each_mount_is_a_fresh_check() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/check-auth"))
        .respond_with(check_auth_live())
        .expect(2)
        .mount(&server)
        .await;

    let client = client_at(&server, "/dashboard");
    let route = RouteContext::new("/dashboard");

    assert_eq!(client.guard().verify(&route).await, Verification::Authenticated);
    assert_eq!(client.guard().verify(&route).await, Verification::Authenticated);
}
