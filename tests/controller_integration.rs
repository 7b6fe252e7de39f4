//! End-to-end tests for the page controller against a mock API server.

use catalog_core::{ApiClient, ApiConfig, LoadPhase, PageController, ProductId};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::new(format!("{}/", server.uri()), "Valantis")).unwrap()
}

async fn mount_ids(server: &MockServer, ids: &[&str], total: u64) {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"action": "get_ids"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": ids,
            "total": total
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_populates_products_and_page_count() {
    let server = MockServer::start().await;
    mount_ids(&server, &["a", "b"], 260).await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"action": "get_items", "params": {"ids": ["a", "b"]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"id": "a", "product": "Кольцо", "price": 15000.0, "brand": "Piaget"},
                {"id": "b", "product": "Серьги", "price": 9500.0, "brand": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut controller = PageController::new();
    controller.refresh(&client).await.unwrap();

    assert_eq!(controller.phase(), LoadPhase::Idle);
    assert!(!controller.is_loading());
    assert_eq!(controller.products().len(), 2);
    assert_eq!(controller.page_state().total_pages, 6, "ceil(260 / 50)");
    assert!(controller.has_next_page());
}

#[tokio::test]
async fn test_refresh_sends_active_filter_and_page_offset() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "action": "get_ids",
            "params": {"brand": "Piaget", "offset": 50, "limit": 50}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [], "total": 60})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut controller = PageController::new();
    controller.stage_brand(Some("Piaget".to_string()));
    controller.commit_staged_filter();
    controller.next_page();

    controller.refresh(&client).await.unwrap();
    assert_eq!(controller.page_state().total_pages, 2);
}

#[tokio::test]
async fn test_refresh_empty_id_page_clears_products_without_detail_call() {
    let server = MockServer::start().await;
    mount_ids(&server, &[], 0).await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"action": "get_items"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut controller = PageController::new();
    controller.refresh(&client).await.unwrap();

    assert!(controller.products().is_empty());
    assert_eq!(controller.phase(), LoadPhase::Idle);
    assert_eq!(controller.page_state().total_pages, 0);
}

#[tokio::test]
async fn test_refresh_id_failure_degrades_to_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut controller = PageController::new();

    // The controller absorbs the ID failure; refresh still returns Ok.
    controller.refresh(&client).await.unwrap();
    assert!(controller.products().is_empty());
    assert_eq!(controller.phase(), LoadPhase::Idle);
}

#[tokio::test]
async fn test_refresh_detail_failure_propagates_but_reaches_idle() {
    let server = MockServer::start().await;
    mount_ids(&server, &["a"], 1).await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"action": "get_items"})))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut controller = PageController::new();
    let result = controller.refresh(&client).await;

    assert!(result.is_err(), "exhausted detail fetch propagates");
    assert_eq!(controller.phase(), LoadPhase::Idle, "loading flag cleared on the failure path");
}

#[tokio::test]
async fn test_load_filter_options_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"params": {"field": "brand"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": ["Piaget", null]})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"params": {"field": "price"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [9500.0]})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"params": {"field": "product"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": ["Кольцо"]})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut controller = PageController::new();
    controller.load_filter_options(&client).await;

    let options = controller.filter_options();
    assert_eq!(options.brand, vec!["Piaget".to_string()]);
    assert_eq!(options.price, vec![9500.0]);
    assert_eq!(options.product, vec!["Кольцо".to_string()]);
}

#[tokio::test]
async fn test_second_refresh_replaces_products_wholesale() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"action": "get_ids", "params": {"offset": 0}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": ["a"], "total": 51})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"action": "get_ids", "params": {"offset": 50}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": ["b"], "total": 51})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"action": "get_items", "params": {"ids": ["a"]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{"id": "a", "product": "one", "price": 1.0, "brand": null}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"action": "get_items", "params": {"ids": ["b"]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{"id": "b", "product": "two", "price": 2.0, "brand": null}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut controller = PageController::new();

    controller.refresh(&client).await.unwrap();
    assert_eq!(controller.products()[0].id, ProductId::new("a"));

    controller.next_page();
    controller.refresh(&client).await.unwrap();
    assert_eq!(controller.products().len(), 1, "replaced, not appended");
    assert_eq!(controller.products()[0].id, ProductId::new("b"));
}
