//! Testes de ponta a ponta do router sobre o store em memória.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crm_backend::{
    config::AppState,
    db::{Collection, DocumentStore, MemoryStore},
    routes,
};

fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (routes::router(AppState::from_store(store.clone())), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn contact(email: &str) -> Value {
    json!({
        "firstName": "Alice",
        "lastName": "Johnson",
        "email": email,
        "companyName": "TechCorp",
        "type": "Business",
        "owner": Uuid::new_v4(),
        "tags": ["vip"],
    })
}

#[tokio::test]
async fn created_contact_can_be_fetched() {
    let (app, _) = app();

    let (status, created) = send(&app, Method::POST, "/api/contacts", Some(contact("alice@techcorp.com"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "Active");
    assert!(created["createdAt"].is_string());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, all) = send(&app, Method::GET, "/api/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_email_is_rejected_and_stored_once() {
    let (app, store) = app();

    let (status, _) = send(&app, Method::POST, "/api/contacts", Some(contact("alice@techcorp.com"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/contacts", Some(contact("alice@techcorp.com"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "A contact with this email already exists");

    assert_eq!(store.find_all(Collection::Contacts).await.unwrap().len(), 1);
}

#[tokio::test]
async fn stage_update_leaves_other_fields_alone() {
    let (app, _) = app();
    let (_, lead) = send(
        &app,
        Method::POST,
        "/api/leads",
        Some(json!({
            "title": "Enterprise License Deal",
            "companyName": "TechCorp",
            "status": "Qualified",
            "estimatedValue": 25000,
            "probability": 75,
            "assignedTo": Uuid::new_v4(),
        })),
    )
    .await;
    let id = lead["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/leads/{id}"),
        Some(json!({ "stage": "Closed Won" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["stage"], "Closed Won");

    for field in ["title", "companyName", "status", "estimatedValue", "probability", "assignedTo", "createdAt"] {
        assert_eq!(updated[field], lead[field], "{field} changed");
    }
}

#[tokio::test]
async fn deleted_documents_are_gone() {
    let (app, _) = app();
    let (_, created) = send(&app, Method::POST, "/api/contacts", Some(contact("bob@startup.io"))).await;
    let uri = format!("/api/contacts/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not found" }));

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_errors_list_each_field() {
    let (app, store) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(json!({ "firstName": "", "lastName": "Smith", "email": "nope", "type": "Private", "owner": Uuid::nil() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    let paths: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["email", "firstName"]);

    // Tipo errado: apontado no próprio campo
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/leads",
        Some(json!({ "title": "X", "companyName": "Y", "assignedTo": Uuid::nil(), "probability": "high" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["path"], "probability");

    assert!(store.find_all(Collection::Contacts).await.unwrap().is_empty());
}

#[tokio::test]
async fn null_clears_optional_fields_and_rejects_required_ones() {
    let (app, _) = app();
    let (_, created) = send(&app, Method::POST, "/api/contacts", Some(contact("alice@techcorp.com"))).await;
    let uri = format!("/api/contacts/{}", created["id"].as_str().unwrap());
    assert_eq!(created["companyName"], "TechCorp");

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({ "companyName": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated.get("companyName").map_or(true, Value::is_null));
    assert_eq!(updated["firstName"], "Alice");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "email": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["path"], "email");

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["email"], "alice@techcorp.com");
}

#[tokio::test]
async fn nested_type_errors_carry_the_item_index() {
    let (app, store) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/quotes",
        Some(json!({
            "products": [
                { "name": "Licença", "quantity": 1, "price": 100 },
                { "name": "Suporte", "quantity": "two", "price": 50 },
            ],
            "contact": Uuid::nil(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["path"], "products.1.quantity");
    assert!(store.find_all(Collection::Quotes).await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_ids_and_bodies_are_bad_requests() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/leads/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_ok_on_both_paths() {
    let (app, _) = app();
    for uri in ["/health", "/api/health"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn one_character_search_skips_the_store() {
    let (app, store) = app();

    let (status, body) = send(&app, Method::GET, "/api/search?q=a", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "contacts": [], "leads": [], "activities": [] }));

    let (status, _) = send(&app, Method::GET, "/api/search", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.operation_count(), 0);
}

#[tokio::test]
async fn search_finds_contacts_by_company() {
    let (app, _) = app();
    send(&app, Method::POST, "/api/contacts", Some(contact("alice@techcorp.com"))).await;

    let (status, body) = send(&app, Method::GET, "/api/search?q=techc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contacts"].as_array().unwrap().len(), 1);
    assert_eq!(body["contacts"][0]["email"], "alice@techcorp.com");
}

#[tokio::test]
async fn stats_reflect_the_pipeline() {
    let (app, _) = app();
    for (value, stage, status) in [(100, "Closed Won", "Qualified"), (200, "Closed Won", "Qualified"), (300, "Negotiation", "Lost")] {
        let (code, _) = send(
            &app,
            Method::POST,
            "/api/leads",
            Some(json!({
                "title": "Deal",
                "companyName": "Acme",
                "stage": stage,
                "status": status,
                "estimatedValue": value,
                "assignedTo": Uuid::nil(),
            })),
        )
        .await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revenue"]["value"], 600.0);
    assert_eq!(body["leads"]["value"], 3);
    assert_eq!(body["deals"]["value"], 2);
    assert_eq!(body["winRate"]["value"], 67);
    // Tudo criado agora: não há período anterior para comparar
    assert!(body["winRate"]["change"].is_null());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/search"].is_object());
    assert!(body["paths"]["/api/contacts/{id}"]["put"].is_object());
    assert!(body["paths"]["/api/invoices"]["post"].is_object());
    assert!(body["components"]["schemas"]["Quote"].is_object());
}
