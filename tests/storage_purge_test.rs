mod helpers;

use derby_reset::reset::{purge_bucket, BucketOutcome, PurgeStage};
use helpers::*;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn empty_bucket_sends_no_delete() {
    let server = MockServer::start().await;
    mount_listing(&server, json!([])).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut out = Vec::new();
    let outcome = purge_bucket(&client, BUCKET, &mut out).await.unwrap();

    assert!(matches!(outcome, BucketOutcome::AlreadyEmpty));
    assert_eq!(String::from_utf8(out).unwrap(), "  ✓ car-images (already empty)\n");
}

#[tokio::test]
async fn listing_without_names_counts_as_empty() {
    let server = MockServer::start().await;
    mount_listing(&server, json!([{ "id": null }, "stray"])).await;

    let client = test_client(&server);
    let outcome = purge_bucket(&client, BUCKET, &mut Vec::new()).await.unwrap();

    assert!(matches!(outcome, BucketOutcome::AlreadyEmpty));
    assert_eq!(
        request_log(&server).await,
        vec!["POST /storage/v1/object/list/car-images"]
    );
}

#[tokio::test]
async fn no_content_listing_counts_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/object/list/car-images"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let outcome = purge_bucket(&client, BUCKET, &mut Vec::new()).await.unwrap();
    assert!(matches!(outcome, BucketOutcome::AlreadyEmpty));
}

#[tokio::test]
async fn listing_asks_for_first_page_at_root() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/object/list/car-images"))
        .and(body_json(json!({ "prefix": "", "limit": 1000, "offset": 0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    purge_bucket(&client, BUCKET, &mut Vec::new()).await.unwrap();
}

#[tokio::test]
async fn all_listed_objects_go_in_one_bulk_delete() {
    let server = MockServer::start().await;
    let names: Vec<String> = (1..=5).map(|i| format!("car-{i}.jpg")).collect();
    let listing: Vec<Value> = names
        .iter()
        .map(|n| json!({ "name": n, "metadata": { "size": 1024 } }))
        .collect();
    mount_listing(&server, Value::Array(listing)).await;
    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/car-images"))
        .and(body_json(json!({ "prefixes": names })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut out = Vec::new();
    let outcome = purge_bucket(&client, BUCKET, &mut out).await.unwrap();

    assert!(matches!(outcome, BucketOutcome::Deleted(5)));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "  ✓ car-images (5 photo(s) deleted)\n"
    );
}

#[tokio::test]
async fn malformed_listing_is_reported_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/object/list/car-images"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut out = Vec::new();
    let outcome = purge_bucket(&client, BUCKET, &mut out).await.unwrap();

    assert!(matches!(
        outcome,
        BucketOutcome::Failed { stage: PurgeStage::List, .. }
    ));
    assert!(String::from_utf8(out)
        .unwrap()
        .starts_with("  ERROR listing car-images: unexpected response body"));
}

#[tokio::test]
async fn null_listing_counts_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/object/list/car-images"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut out = Vec::new();
    let outcome = purge_bucket(&client, BUCKET, &mut out).await.unwrap();

    assert!(matches!(outcome, BucketOutcome::AlreadyEmpty));
    assert_eq!(String::from_utf8(out).unwrap(), "  ✓ car-images (already empty)\n");
}
