use std::collections::HashSet;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use template_match_api::{
    db::InMemoryCatalog,
    models::Template,
    routes::{create_router, AppState},
};

fn create_test_catalog() -> Vec<Template> {
    vec![
        Template::new(1, "Modern Bakery", "Restaurant", &["food", "cafe"]),
        Template::new(2, "Shopfront", "eCommerce", &["shop", "fashion"]).pro(),
        Template::new(3, "Consultant", "Business", &["eCommerce", "corporate"]),
        Template::new(4, "Lens", "Photography", &["gallery"]).pro(),
        Template::new(5, "Folio", "Portfolio", &[]),
        Template::new(6, "Grill House", "Restaurant", &["food", "menu"]),
    ]
}

fn create_test_server(templates: Vec<Template>) -> TestServer {
    let state = AppState::new(Arc::new(InMemoryCatalog::new(templates))).with_jitter_seed(42);
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn ids(items: &[Value], pointer: &str) -> Vec<i64> {
    items
        .iter()
        .map(|item| item.pointer(pointer).and_then(Value::as_i64).unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(vec![]);
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_header_is_echoed() {
    let server = create_test_server(vec![]);
    let id = "6f1c1c9e-3a51-4a55-9c3f-8d2b8f1f6b77";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_match_cafe_intent() {
    let server = create_test_server(create_test_catalog());

    let response = server
        .get("/api/v1/templates/match")
        .add_query_param("q", "I want to open a cafe")
        .add_query_param("limit", 5)
        .await;

    response.assert_status_ok();
    let matches: Vec<Value> = response.json();
    assert_eq!(matches.len(), 5);
    assert_eq!(matches[0]["template"]["id"], 1);
    assert!(matches[0]["score"].as_f64().unwrap() >= 20.0);
    assert_eq!(matches[0]["template"]["title"], "Modern Bakery");
}

#[tokio::test]
async fn test_match_default_limit() {
    let mut catalog = create_test_catalog();
    for id in 10..20 {
        catalog.push(Template::new(id, "Filler", "Blog", &["news"]));
    }
    let server = create_test_server(catalog);

    let response = server
        .get("/api/v1/templates/match")
        .add_query_param("q", "a news blog")
        .await;

    response.assert_status_ok();
    let matches: Vec<Value> = response.json();
    assert_eq!(matches.len(), 6);
}

#[tokio::test]
async fn test_match_min_score_filters_weak_matches() {
    let server = create_test_server(create_test_catalog());

    let response = server
        .get("/api/v1/templates/match")
        .add_query_param("q", "sell my products online")
        .add_query_param("limit", 6)
        .add_query_param("min_score", 10)
        .await;

    response.assert_status_ok();
    let matches: Vec<Value> = response.json();
    assert_eq!(ids(&matches, "/template/id"), vec![2]);
}

#[tokio::test]
async fn test_match_blank_query_is_empty() {
    let server = create_test_server(create_test_catalog());

    let response = server.get("/api/v1/templates/match").await;
    response.assert_status_ok();
    let matches: Vec<Value> = response.json();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_match_limit_too_large() {
    let server = create_test_server(create_test_catalog());

    let response = server
        .get("/api/v1/templates/match")
        .add_query_param("q", "cafe")
        .add_query_param("limit", 500)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("at most 50"));
}

#[tokio::test]
async fn test_by_category_includes_tagged_templates() {
    let server = create_test_server(create_test_catalog());

    let response = server
        .get("/api/v1/templates/category/ecommerce")
        .add_query_param("limit", 10)
        .await;

    response.assert_status_ok();
    let templates: Vec<Value> = response.json();
    assert_eq!(ids(&templates, "/id"), vec![2, 3]);
    assert_eq!(templates[0]["isPro"], true);
}

#[tokio::test]
async fn test_by_category_keeps_catalog_order() {
    let server = create_test_server(create_test_catalog());

    let first: Vec<Value> = server.get("/api/v1/templates/category/Restaurant").await.json();
    let second: Vec<Value> = server.get("/api/v1/templates/category/Restaurant").await.json();

    assert_eq!(ids(&first, "/id"), vec![1, 6]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_recommendations_are_unique_and_bounded() {
    let server = create_test_server(create_test_catalog());

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("count", 4)
        .await;

    response.assert_status_ok();
    let templates: Vec<Value> = response.json();
    assert_eq!(templates.len(), 4);
    let unique: HashSet<i64> = ids(&templates, "/id").into_iter().collect();
    assert_eq!(unique.len(), 4);
}

#[tokio::test]
async fn test_recommendations_capped_by_catalog() {
    let server = create_test_server(create_test_catalog());

    let templates: Vec<Value> = server
        .get("/api/v1/recommendations")
        .add_query_param("count", 20)
        .await
        .json();

    assert_eq!(templates.len(), 6);
}

#[tokio::test]
async fn test_recommendations_empty_catalog() {
    let server = create_test_server(vec![]);

    let response = server.get("/api/v1/recommendations").await;
    response.assert_status_ok();
    let templates: Vec<Value> = response.json();
    assert!(templates.is_empty());
}
