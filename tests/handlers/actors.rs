use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use crate::common::*;

fn new_actor() -> Value {
    json!({ "name": "Sushant Singh Rajput", "age": 34, "gender": "Male" })
}

async fn create_actor(app: &TestApp, token: &str) -> Value {
    let (status, json) = app
        .send(Method::POST, "/actors", Some(token), Some(new_actor()))
        .await;
    assert_eq!(status, StatusCode::OK);
    json["actor"].clone()
}

#[tokio::test]
async fn test_create_actor_as_director() {
    let app = test_app();
    let token = token_for(CASTING_DIRECTOR);

    let (status, json) = app
        .send(Method::POST, "/actors", Some(&token), Some(new_actor()))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["actor"]["id"].as_i64().is_some());
    assert_eq!(json["actor"]["name"], "Sushant Singh Rajput");
    assert_eq!(json["actor"]["age"], 34);
    assert_eq!(json["actor"]["gender"], "Male");
}

#[tokio::test]
async fn test_create_actor_missing_field_is_400() {
    let app = test_app();
    let token = token_for(CASTING_DIRECTOR);

    let (status, json) = app
        .send(
            Method::POST,
            "/actors",
            Some(&token),
            Some(json!({ "name": "No Age", "gender": "Female" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], 400);
    assert_eq!(json["message"], "Bad Request");
}

#[tokio::test]
async fn test_create_actor_without_body_is_400() {
    let app = test_app();
    let token = token_for(CASTING_DIRECTOR);

    let (status, json) = app.send(Method::POST, "/actors", Some(&token), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], 400);
}

#[tokio::test]
async fn test_created_actor_is_listed_unchanged() {
    let app = test_app();
    let director = token_for(CASTING_DIRECTOR);
    let assistant = token_for(CASTING_ASSISTANT);

    let created = create_actor(&app, &director).await;

    let (status, json) = app.send(Method::GET, "/actors", Some(&assistant), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["actors"], json!([created]));
}

#[tokio::test]
async fn test_list_actors_empty() {
    let app = test_app();
    let token = token_for(CASTING_ASSISTANT);

    let (status, json) = app.send(Method::GET, "/actors", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["actors"], json!([]));
}

#[tokio::test]
async fn test_patch_actor_updates_only_given_fields() {
    let app = test_app();
    let token = token_for(CASTING_DIRECTOR);
    let created = create_actor(&app, &token).await;
    let id = created["id"].as_i64().unwrap();

    let (status, json) = app
        .send(
            Method::PATCH,
            &format!("/actors/{}", id),
            Some(&token),
            Some(json!({ "age": 35, "name": "" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["actor"]["id"], id);
    assert_eq!(json["actor"]["age"], 35);
    // Empty strings leave the stored value alone.
    assert_eq!(json["actor"]["name"], "Sushant Singh Rajput");
    assert_eq!(json["actor"]["gender"], "Male");
}

#[tokio::test]
async fn test_patch_actor_with_empty_body_returns_actor() {
    let app = test_app();
    let token = token_for(CASTING_DIRECTOR);
    let created = create_actor(&app, &token).await;
    let id = created["id"].as_i64().unwrap();

    let (status, json) = app
        .send(Method::PATCH, &format!("/actors/{}", id), Some(&token), Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["actor"], created);
}

#[tokio::test]
async fn test_patch_missing_actor_is_404() {
    let app = test_app();

    for role in [CASTING_DIRECTOR, EXECUTIVE_PRODUCER] {
        let token = token_for(role);
        let (status, json) = app
            .send(
                Method::PATCH,
                "/actors/9999",
                Some(&token),
                Some(json!({ "name": "Ghost" })),
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], 404);
        assert_eq!(json["message"], "resource not found");
    }
}

#[tokio::test]
async fn test_delete_actor_then_delete_again_is_404() {
    let app = test_app();
    let token = token_for(CASTING_DIRECTOR);
    let created = create_actor(&app, &token).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/actors/{}", id);

    let (status, json) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["delete"], id);

    let (status, json) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], 404);
}

#[tokio::test]
async fn test_non_numeric_actor_id_is_404() {
    let app = test_app();
    let token = token_for(EXECUTIVE_PRODUCER);

    let (status, json) = app.send(Method::DELETE, "/actors/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "resource not found");
}
