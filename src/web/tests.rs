//! End-to-end tests against the assembled router

use super::{create_router, AppState};
use crate::config::Settings;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    app_with(Settings::default())
}

fn app_with(settings: Settings) -> Router {
    create_router(AppState::new(settings).unwrap())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn ids(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Artifind API is running");
    assert_eq!(body["version"], crate::VERSION);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = get(&app(), "/api/nope?x=1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
    assert_eq!(body["message"], "Cannot GET /api/nope?x=1");
}

#[tokio::test]
async fn test_list_products_defaults() {
    let (status, body) = get(&app(), "/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 6);
    assert_eq!(body["count"], 6);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pages"], 1);
    // newest first
    assert_eq!(ids(&body), vec!["6", "5", "4", "3", "2", "1"]);
    assert_eq!(body["data"][5]["price"], 89.99);
}

#[tokio::test]
async fn test_list_products_filtered_and_sorted() {
    let app = app();

    let (_, body) = get(&app, "/api/products?category=textiles&sortField=price&sortOrder=asc").await;
    assert_eq!(ids(&body), vec!["3", "6"]);

    let (_, body) = get(&app, "/api/products?minPrice=150&maxPrice=250&sort=price&order=asc").await;
    assert_eq!(ids(&body), vec!["2", "4", "3"]);

    let (_, body) = get(&app, "/api/products?search=WOOL").await;
    assert_eq!(ids(&body), vec!["6"]);

    let (_, body) = get(&app, "/api/products?featured=true&inStock=true").await;
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_list_products_pagination() {
    let app = app();

    let (_, body) = get(&app, "/api/products?limit=2&page=2").await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["pages"], 3);
    assert_eq!(ids(&body), vec!["4", "3"]);

    let (_, body) = get(&app, "/api/products?page=5").await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["total"], 6);
    assert_eq!(body["page"], 5);

    let (_, body) = get(&app, "/api/products?page=-1&limit=abc").await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["count"], 6);
}

#[tokio::test]
async fn test_search_products_with_json_descriptor() {
    let app = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/products/search",
        json!({"filters": {"featured": true}, "sortField": "rating", "sortOrder": "desc"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["3", "2", "1"]);

    let (status, body) =
        send_json(&app, Method::POST, "/api/products/search", json!({"search": 5})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::post("/api/products/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_product_lookups() {
    let app = app();

    let (status, body) = get(&app, "/api/products/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Handcrafted Ceramic Bowl Set");

    let (status, body) = get(&app, "/api/products/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");

    let (_, body) = get(&app, "/api/products/artisan/4").await;
    assert_eq!(body["count"], 1);
    assert!(body.get("pages").is_none());

    let (_, body) = get(&app, "/api/products/category/TEXTILES").await;
    assert_eq!(ids(&body), vec!["3", "6"]);
}

#[tokio::test]
async fn test_create_product() {
    let app = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/products",
        json!({"title": "Mug", "description": "A mug"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Title, description, artisan ID, category, and price are required"
    );

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/products",
        json!({
            "title": "Speckled Mug",
            "description": "Stoneware mug",
            "artisanId": "1",
            "category": "Pottery",
            "price": "$32.00",
            "stockQuantity": 5
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product created successfully");
    assert_eq!(body["data"]["id"], "7");
    assert_eq!(body["data"]["price"], 32.0);
    assert_eq!(body["data"]["artisan"], "Elena Rodriguez");
    assert_eq!(body["data"]["inStock"], true);

    let (_, body) = get(&app, "/api/products").await;
    assert_eq!(body["total"], 7);
    assert_eq!(ids(&body)[0], "7");
}

#[tokio::test]
async fn test_update_and_delete_product() {
    let app = app();

    let (status, body) =
        send_json(&app, Method::PUT, "/api/products/1", json!({"stockQuantity": 0})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["inStock"], false);
    assert_eq!(body["data"]["id"], "1");

    let (status, _) =
        send_json(&app, Method::PUT, "/api/products/99", json!({"price": 10})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app,
        Method::PUT,
        "/api/products/1",
        json!({"title": "x".repeat(201)}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let delete = || Request::delete("/api/products/2").body(Body::empty()).unwrap();
    let (status, body) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, _) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = get(&app, "/api/products").await;
    assert_eq!(body["total"], 5);
}

#[tokio::test]
async fn test_list_artisans() {
    let app = app();

    let (_, body) = get(&app, "/api/artisans").await;
    assert_eq!(body["total"], 6);
    assert_eq!(ids(&body), vec!["3", "5", "1", "2", "4", "6"]);
    assert_eq!(body["data"][0]["rating"], json!({"average": 5.0, "count": 73}));

    let (_, body) = get(&app, "/api/artisans?rating=4.9&sortField=name&sortOrder=asc").await;
    assert_eq!(ids(&body), vec!["4", "2", "3"]);

    let (_, body) = get(&app, "/api/artisans?specialty=weav&location=nm").await;
    assert_eq!(ids(&body), vec!["6"]);

    let (_, body) = get(&app, "/api/artisans?search=glazing").await;
    assert_eq!(ids(&body), vec!["1"]);
}

#[tokio::test]
async fn test_artisan_crud() {
    let app = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/artisans",
        json!({"name": "Ines", "specialty": "Leather", "location": "Tucson, AZ", "email": "bad"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a valid email");

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/artisans",
        json!({"name": "Ines", "specialty": "Leather", "location": "Tucson, AZ"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "7");
    assert_eq!(body["data"]["verified"], false);

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/artisans/7",
        json!({"location": "Phoenix, AZ"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["location"], "Phoenix, AZ");

    let (status, _) = send(
        &app,
        Request::delete("/api/artisans/7").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/api/artisans/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Artisan not found");
}

#[tokio::test]
async fn test_chat_session_lifecycle() {
    let app = app();

    let (status, body) =
        send_json(&app, Method::POST, "/api/chat/message", json!({"message": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/chat/message",
        json!({"message": "Do you have pottery?"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let session = body["data"]["sessionId"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["conversationLength"], 2);
    assert_eq!(body["data"]["message"]["role"], "assistant");
    assert_eq!(body["data"]["message"]["actions"][1]["category"], "Pottery");

    let (_, body) = get(&app, &format!("/api/chat/history/{}?limit=1", session)).await;
    assert_eq!(body["data"]["totalMessages"], 2);
    assert_eq!(body["data"]["messages"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        Request::delete(format!("/api/chat/session/{}", session))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Conversation history cleared successfully");

    let (_, body) = get(&app, &format!("/api/chat/history/{}", session)).await;
    assert_eq!(body["data"]["totalMessages"], 0);
}

#[tokio::test]
async fn test_voice_to_text() {
    let app = app();

    let (status, _) = send_json(&app, Method::POST, "/api/chat/voice-to-text", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/chat/voice-to-text",
        json!({"audioData": "UklGRg=="}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["language"], "en-US");
    assert_eq!(body["data"]["confidence"], 0.94);
}

#[tokio::test]
async fn test_ai_text_helpers() {
    let app = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/ai/suggest-tags",
        json!({"title": "Vase", "materials": ["Glass"], "category": "Glass Art"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let tags = body["data"]["tags"].as_array().unwrap();
    assert_eq!(tags[tags.len() - 2], "glass");
    assert_eq!(tags[tags.len() - 1], "glass-art");

    let (status, _) = send_json(&app, Method::POST, "/api/ai/suggest-tags", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send_json(
        &app,
        Method::POST,
        "/api/ai/enhance-search",
        json!({"query": "wood spoon"}),
    )
    .await;
    assert_eq!(body["data"]["synonyms"], json!(["timber", "lumber"]));

    let (status, body) =
        send_json(&app, Method::POST, "/api/ai/generate-description", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Either image analysis data or user prompt is required"
    );

    let (_, body) = send_json(
        &app,
        Method::POST,
        "/api/ai/personalize-recommendations",
        json!({"userId": "u1"}),
    )
    .await;
    assert_eq!(body["data"]["recommendations"][0]["productId"], "1");
}

fn multipart_request(file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "artifind-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::post("/api/ai/analyze-image")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_analyze_image() {
    let app = app();

    let (status, body) = send(&app, multipart_request("bowl.png", "image/png", b"\x89PNG")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["primaryCategory"], "Pottery");
    assert_eq!(body["data"]["labels"].as_array().unwrap().len(), 3);

    let (status, body) = send(&app, multipart_request("notes.txt", "text/plain", b"hi")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only image files are allowed");
}

#[tokio::test]
async fn test_analyze_image_size_limit() {
    let mut settings = Settings::default();
    settings.ai.max_upload_bytes = 16;
    let app = app_with(settings);

    let (status, body) = send(&app, multipart_request("bowl.png", "image/png", &[0u8; 64])).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_rate_limit() {
    let mut settings = Settings::default();
    settings.server.rate_limit.max_requests = 2;
    let app = app_with(settings);

    assert_eq!(get(&app, "/api/health").await.0, StatusCode::OK);
    assert_eq!(get(&app, "/api/health").await.0, StatusCode::OK);

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body["error"],
        "Too many requests from this IP, please try again later."
    );
}

#[tokio::test]
async fn test_cors_and_security_headers() {
    let request = Request::get("/api/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
}

#[tokio::test]
async fn test_unseeded_catalog_is_empty() {
    let mut settings = Settings::default();
    settings.catalog.seed_demo_data = false;
    let (_, body) = get(&app_with(settings), "/api/products").await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["pages"], 0);
}
