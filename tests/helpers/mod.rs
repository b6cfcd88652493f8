#![allow(dead_code)]

use derby_reset::backend::SupabaseClient;
use derby_reset::config::{BackendConfig, ResetConfig};
use derby_reset::schema::Table;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TEST_KEY: &str = "test-service-key";

/// Predicate the default range strategy sends on every table delete.
pub const MATCH_ALL: &str = "gte.00000000-0000-0000-0000-000000000000";

pub const BUCKET: &str = "car-images";

/// Default config pointed at the mock server.
pub fn test_config(server: &MockServer) -> ResetConfig {
    let mut config = ResetConfig::default();
    config.backend = BackendConfig {
        url: server.uri(),
        api_key: TEST_KEY.into(),
    };
    config
}

pub fn test_client(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(&test_config(server).backend).unwrap()
}

/// Accept the race_state patch and every table delete with 204.
pub async fn mount_rest_ok(server: &MockServer) {
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/race_state"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
    for table in Table::DELETION_ORDER {
        Mock::given(method("DELETE"))
            .and(path(format!("/rest/v1/{table}")))
            .respond_with(ResponseTemplate::new(204))
            .mount(server)
            .await;
    }
}

/// Answer the bucket listing with `entries`.
pub async fn mount_listing(server: &MockServer, entries: Value) {
    Mock::given(method("POST"))
        .and(path(format!("/storage/v1/object/list/{BUCKET}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(entries))
        .mount(server)
        .await;
}

/// Accept the bulk delete with 200.
pub async fn mount_bulk_delete_ok(server: &MockServer) {
    Mock::given(method("DELETE"))
        .and(path(format!("/storage/v1/object/{BUCKET}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(server)
        .await;
}

/// Respond to one route with an error, ahead of any other mock for it.
pub async fn mount_failure(server: &MockServer, verb: &str, route: &str, status: u16, body: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .with_priority(1)
        .mount(server)
        .await;
}

/// Every request the server saw, in arrival order.
pub async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

/// `"METHOD /path"` for each request, in arrival order.
pub async fn request_log(server: &MockServer) -> Vec<String> {
    received(server)
        .await
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}

/// The full reset sequence as `"METHOD /path"` lines, bucket steps included.
pub fn expected_log(with_photos: bool) -> Vec<String> {
    let mut log = vec!["PATCH /rest/v1/race_state".to_string()];
    log.extend(
        Table::DELETION_ORDER
            .iter()
            .map(|t| format!("DELETE /rest/v1/{t}")),
    );
    if with_photos {
        log.push(format!("POST /storage/v1/object/list/{BUCKET}"));
        log.push(format!("DELETE /storage/v1/object/{BUCKET}"));
    }
    log
}
