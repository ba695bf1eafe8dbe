use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};

use crate::common::*;

#[tokio::test]
async fn test_unknown_route_uses_envelope() {
    let app = test_app();

    let (status, json) = app.send(Method::GET, "/directors", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], 404);
    assert_eq!(json["message"], "resource not found");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = test_app();
    let token = token_for(EXECUTIVE_PRODUCER);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/actors")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, json) = app.send_request(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Bad Request");
}

#[tokio::test]
async fn test_cors_preflight_allows_authorization_header() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/actors")
        .header(header::ORIGIN, "http://localhost:8100")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let allowed_headers = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allowed_headers.contains("authorization"));
    let allowed_methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(allowed_methods.contains("PATCH"));
    assert!(allowed_methods.contains("DELETE"));
}
