//! Integration tests for `ApiClient` using wiremock HTTP mocks.

use rust_decimal::Decimal;
use serde_json::json;
use tiim_client::{ApiClient, ClientError};
use tiim_core::{Coordinate, DeliveryMethod, OrderItem, OrderRequest, SearchQuery};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, 5, "tiim-test/0.1").expect("client construction should not fail")
}

fn sample_order(method: DeliveryMethod) -> OrderRequest {
    OrderRequest {
        user_name: "Awa Ouedraogo".to_string(),
        user_phone: "+22670000000".to_string(),
        pharmacy_id: "ph-1".to_string(),
        items: vec![OrderItem {
            inventory_id: "A".to_string(),
            medicine_name: "Paracétamol 500mg".to_string(),
            price: Decimal::new(500, 0),
            quantity: 2,
            requires_prescription: false,
        }],
        delivery_method: method,
        delivery_address: None,
        prescription_url: None,
    }
}

// ---------------------------------------------------------------------------
// GET /api/pharmacies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_pharmacies_sends_city_and_parses_entries() {
    let server = MockServer::start().await;

    let body = json!([
        {
            "id": "ph-1",
            "name": "Pharmacie du Centre",
            "address": "Avenue Kwame Nkrumah",
            "phone": "+226 25 30 00 00",
            "latitude": 12.3681,
            "longitude": -1.5275
        },
        { "_id": "ph-2", "name": "Pharmacie Sans GPS", "latitude": null }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .and(query_param("city", "Ouagadougou"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let pharmacies = client
        .list_pharmacies(Some("Ouagadougou"))
        .await
        .expect("should parse pharmacies");

    assert_eq!(pharmacies.len(), 2);
    assert_eq!(pharmacies[0].display_name(), "Pharmacie du Centre");
    assert!(pharmacies[0].position().is_some());
    assert_eq!(pharmacies[1].identifier(), Some("ph-2"));
    assert!(pharmacies[1].position().is_none());
}

#[tokio::test]
async fn list_pharmacies_non_array_body_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let pharmacies = client.list_pharmacies(None).await.expect("should succeed");
    assert!(pharmacies.is_empty());
}

#[tokio::test]
async fn list_pharmacies_server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_pharmacies(Some("Ouagadougou"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::Api { status: 503, detail: None }),
        "expected Api(503), got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// GET /api/search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_forwards_query_barcode_and_coordinates() {
    let server = MockServer::start().await;

    let body = json!([{
        "inventory_id": "inv-1",
        "medicine_name": "Doliprane 1000mg",
        "dci": "paracetamol",
        "barcode": "3400935955838",
        "pharmacy_id": "ph-1",
        "pharmacy_name": "Pharmacie du Centre",
        "pharmacy_address": "Avenue Kwame Nkrumah",
        "price": 1250,
        "distance_km": 0.8
    }]);

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "doliprane"))
        .and(query_param("barcode", "3400935955838"))
        .and(query_param("latitude", "12.3714"))
        .and(query_param("longitude", "-1.5197"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let query = SearchQuery::new(Some("doliprane"), Some("3400935955838"))
        .near(Some(Coordinate::new(12.3714, -1.5197)));
    let results = client.search(&query).await.expect("should parse results");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].inventory_id, "inv-1");
    assert_eq!(results[0].price, Decimal::new(1250, 0));
    assert_eq!(results[0].distance_km, Some(0.8));
}

#[tokio::test]
async fn search_without_coordinates_returns_no_distance() {
    let server = MockServer::start().await;

    let body = json!([{
        "inventory_id": "inv-2",
        "medicine_name": "Amoxicilline 500mg",
        "pharmacy_id": "ph-3",
        "pharmacy_name": "Pharmacie de la Paix",
        "pharmacy_address": "Rue 12.34",
        "price": 2100.5
    }]);

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "amoxicilline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .search(&SearchQuery::new(Some("amoxicilline"), None))
        .await
        .expect("should parse results");

    assert!(results[0].distance_km.is_none());
    assert!(results[0].dci.is_none());
}

#[tokio::test]
async fn search_server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search(&SearchQuery::new(Some("x"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert_eq!(err.detail(), Some("boom"));
}

#[tokio::test]
async fn search_malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search(&SearchQuery::new(Some("x"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Deserialize { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_http_error() {
    // Port 9 (discard) on localhost is not served by the test harness.
    let client = test_client("http://127.0.0.1:9");
    let err = client
        .search(&SearchQuery::new(Some("x"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// POST /api/orders
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_order_posts_payload_and_parses_result() {
    let server = MockServer::start().await;

    let expected_body = json!({
        "user_name": "Awa Ouedraogo",
        "user_phone": "+22670000000",
        "pharmacy_id": "ph-1",
        "items": [{
            "inventory_id": "A",
            "medicine_name": "Paracétamol 500mg",
            "price": 500.0,
            "quantity": 2,
            "requires_prescription": false
        }],
        "delivery_method": "click_collect"
    });

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_json(&expected_body))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": "ord-1", "status": "pending", "total_amount": 1000})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .submit_order(&sample_order(DeliveryMethod::ClickCollect))
        .await
        .expect("order should be accepted");

    assert_eq!(result.status, "pending");
    assert_eq!(result.total_amount, Decimal::new(1000, 0));
}

#[tokio::test]
async fn submit_order_surfaces_backend_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Stock insuffisant"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .submit_order(&sample_order(DeliveryMethod::Delivery))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 400, .. }));
    assert_eq!(err.detail(), Some("Stock insuffisant"));
}

#[tokio::test]
async fn submit_order_non_string_detail_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"loc": ["body", "user_phone"], "msg": "field required"}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .submit_order(&sample_order(DeliveryMethod::Delivery))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 422, detail: None }));
}
