use rust_decimal::Decimal;
use serde_json::json;
use tiim_core::{CheckoutState, DeliveryMethod};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn test_session(base_url: &str) -> Session {
    let client =
        ApiClient::new(base_url, 5, "tiim-test/0.1").expect("client construction should not fail");
    Session::new(client)
}

fn inventory(id: &str, pharmacy_id: &str, price: u32) -> serde_json::Value {
    json!({
        "inventory_id": id,
        "medicine_name": format!("Medicine {id}"),
        "pharmacy_id": pharmacy_id,
        "pharmacy_name": "Pharmacie du Centre",
        "pharmacy_address": "Avenue Kwame Nkrumah",
        "price": price
    })
}

async fn mount_search(server: &MockServer, results: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results))
        .mount(server)
        .await;
}

fn contact_form(method: DeliveryMethod) -> CheckoutForm {
    CheckoutForm {
        user_name: "Awa Ouedraogo".to_string(),
        user_phone: "+22670000000".to_string(),
        delivery_method: method,
        delivery_address: "Secteur 15".to_string(),
        prescription_url: String::new(),
    }
}

/// Session whose cart holds A 500 × 2 and B 1200 × 1.
async fn session_with_cart(server: &MockServer) -> Session {
    mount_search(
        server,
        json!([inventory("A", "ph-1", 500), inventory("B", "ph-1", 1200)]),
    )
    .await;
    let mut session = test_session(&server.uri());
    session.search(Some("para"), None).await;
    session.add_to_cart(0).unwrap();
    session.add_to_cart(0).unwrap();
    session.add_to_cart(1).unwrap();
    session
}

#[tokio::test]
async fn search_forwards_mounted_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("latitude", "12.3714"))
        .and(query_param("longitude", "-1.5197"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = test_session(&server.uri());
    session
        .mount(&Geolocation::from_args(Some(12.3714), Some(-1.5197)))
        .await;
    session.search(Some("doliprane"), None).await;

    assert_eq!(session.message(), Some(messages::NO_RESULTS));
}

#[tokio::test]
async fn search_failure_shows_error_and_empty_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = test_session(&server.uri());
    session.search(Some("x"), None).await;

    assert_eq!(session.message(), Some(messages::SEARCH_FAILED));
    assert!(session.search_panel().results().is_empty());
    assert!(!session.search_panel().is_loading());
}

#[tokio::test]
async fn adding_unknown_result_fails() {
    let server = MockServer::start().await;
    mount_search(&server, json!([inventory("A", "ph-1", 500)])).await;

    let mut session = test_session(&server.uri());
    session.search(Some("x"), None).await;

    assert!(session.add_to_cart(3).is_err());
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn cart_totals_reference_scenario() {
    let server = MockServer::start().await;
    let session = session_with_cart(&server).await;

    assert_eq!(session.cart().len(), 2);
    assert_eq!(session.cart().lines()[0].quantity, 2);
    assert_eq!(session.cart().total(), Decimal::new(2200, 0));
}

#[tokio::test]
async fn checkout_without_contact_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let mut session = session_with_cart(&server).await;
    let before = session.cart().clone();

    session.open_checkout().unwrap();
    let mut form = contact_form(DeliveryMethod::Delivery);
    form.user_phone.clear();
    session.submit_checkout(&form).await;

    assert_eq!(session.message(), Some(messages::MISSING_CONTACT));
    assert!(session.checkout().is_open());
    assert_eq!(session.cart(), &before);
}

#[tokio::test]
async fn successful_checkout_clears_cart_and_closes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"status": "pending", "total_amount": 2200})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let mut session = session_with_cart(&server).await;

    session.open_checkout().unwrap();
    session
        .submit_checkout(&contact_form(DeliveryMethod::ClickCollect))
        .await;

    assert!(session.cart().is_empty());
    assert_eq!(session.checkout().state(), &CheckoutState::Closed);
    assert_eq!(
        session.message(),
        Some("Commande créée. Statut: pending. Total: 2200 CFA")
    );

    let requests = server.received_requests().await.unwrap();
    let order = requests
        .iter()
        .find(|r| r.url.path() == "/api/orders")
        .expect("order request should have been sent");
    let body: serde_json::Value = serde_json::from_slice(&order.body).unwrap();
    assert_eq!(body["pharmacy_id"], "ph-1");
    assert_eq!(body["delivery_method"], "click_collect");
    assert!(body.get("delivery_address").is_none());
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn failed_checkout_keeps_cart_and_shows_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"detail": "Stock insuffisant"})),
        )
        .mount(&server)
        .await;
    let mut session = session_with_cart(&server).await;
    let before = session.cart().clone();

    session.open_checkout().unwrap();
    session
        .submit_checkout(&contact_form(DeliveryMethod::Delivery))
        .await;

    assert_eq!(session.message(), Some("Stock insuffisant"));
    assert_eq!(session.checkout().error(), Some("Stock insuffisant"));
    assert_eq!(session.cart(), &before);
}

#[tokio::test]
async fn failed_checkout_without_detail_uses_default_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let mut session = session_with_cart(&server).await;

    session.open_checkout().unwrap();
    session
        .submit_checkout(&contact_form(DeliveryMethod::Delivery))
        .await;

    assert_eq!(session.message(), Some(messages::ORDER_FAILED));
    assert!(session.checkout().is_open());
    assert_eq!(session.cart().len(), 2);
}

#[tokio::test]
async fn mixed_pharmacy_cart_is_not_submitted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    mount_search(
        &server,
        json!([inventory("A", "ph-1", 500), inventory("C", "ph-2", 800)]),
    )
    .await;

    let mut session = test_session(&server.uri());
    session.search(Some("x"), None).await;
    session.add_to_cart(0).unwrap();
    session.add_to_cart(1).unwrap();
    session.open_checkout().unwrap();
    session
        .submit_checkout(&contact_form(DeliveryMethod::Delivery))
        .await;

    assert_eq!(session.message(), Some(messages::MIXED_PHARMACIES));
    assert_eq!(session.cart().len(), 2);
}

#[tokio::test]
async fn checkout_cannot_open_on_empty_cart() {
    let server = MockServer::start().await;
    let mut session = test_session(&server.uri());
    assert!(session.open_checkout().is_err());
    assert!(!session.checkout().is_open());
}

#[test]
fn order_failure_message_prefers_detail() {
    let err = ClientError::Api {
        status: 400,
        detail: Some("Ordonnance requise".to_string()),
    };
    assert_eq!(order_failure_message(&err), "Ordonnance requise");

    let err = ClientError::Api {
        status: 500,
        detail: None,
    };
    assert_eq!(order_failure_message(&err), messages::ORDER_FAILED);
}

#[tokio::test]
async fn unreachable_backend_reports_transport_error() {
    let server = MockServer::start().await;
    let mut session = session_with_cart(&server).await;
    let before = session.cart().clone();
    session.client = ApiClient::new("http://127.0.0.1:9", 5, "tiim-test/0.1")
        .expect("client construction should not fail");

    session.open_checkout().unwrap();
    session
        .submit_checkout(&contact_form(DeliveryMethod::Delivery))
        .await;

    let message = session.message().expect("failure should set a message");
    assert_ne!(message, messages::ORDER_FAILED);
    assert!(session.checkout().is_open());
    assert_eq!(session.cart(), &before);
}

#[tokio::test]
async fn one_shot_search_output_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = test_session(&server.uri());
    session.search(Some("x"), None).await;

    let printed = crate::render::search_outcome(session.message(), session.search_panel());
    assert!(printed.contains(messages::SEARCH_FAILED));
    assert!(!printed.contains(messages::START_SEARCHING));
}

#[tokio::test]
async fn one_shot_search_output_reports_no_results() {
    let server = MockServer::start().await;
    mount_search(&server, json!([])).await;

    let mut session = test_session(&server.uri());
    session.search(Some("introuvable"), None).await;

    let printed = crate::render::search_outcome(session.message(), session.search_panel());
    assert_eq!(printed, messages::NO_RESULTS);
}
