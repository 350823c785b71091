mod common;

use chrono::Duration;
use common::client;
use common::TestApp;
use reqwest::header::AUTHORIZATION;
use reqwest::header::COOKIE;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Payload {
    sub: i64,
    username: String,
}

fn refresh_cookie(response: &reqwest::Response) -> Option<(String, bool)> {
    response
        .cookies()
        .find(|cookie| cookie.name() == "refresh_token")
        .map(|cookie| (cookie.value().to_string(), cookie.http_only()))
}

async fn access_token(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["access_token"]
        .as_str()
        .expect("access_token missing from body")
        .to_string()
}

#[tokio::test]
async fn test_sign_up_success() {
    let app = TestApp::spawn().await;

    let response = app.sign_up("alicesmith", "secret123").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "alicesmith");
    assert_eq!(body["message"], "User created");
    assert!(body["id"].is_i64());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_sign_up_stores_hash_not_password() {
    let app = TestApp::spawn().await;

    app.sign_up("alicesmith", "secret123").await;

    let stored: String =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE username = 'alicesmith'")
            .fetch_one(&app.pool)
            .await
            .expect("User row missing");
    assert!(stored.starts_with("$argon2id$"));
    assert!(!stored.contains("secret123"));
}

#[tokio::test]
async fn test_sign_up_duplicate_username() {
    let app = TestApp::spawn().await;

    app.sign_up("alicesmith", "secret123").await;
    let response = app.sign_up("alicesmith", "another-pass").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn test_sign_up_concurrent_duplicates_create_one_user() {
    let app = TestApp::spawn().await;

    let (first, second, third) = tokio::join!(
        app.sign_up("alicesmith", "secret123"),
        app.sign_up("alicesmith", "secret456"),
        app.sign_up("alicesmith", "secret789"),
    );

    let statuses = [first.status(), second.status(), third.status()];
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CREATED).count(),
        1
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::BAD_REQUEST)
            .count(),
        2
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = 'alicesmith'")
        .fetch_one(&app.pool)
        .await
        .expect("Failed to count users");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_sign_up_invalid_payloads() {
    let app = TestApp::spawn().await;

    for (username, password) in [
        ("alice", "secret123"),
        ("1alicesmith", "secret123"),
        ("alicesmith_with_a_very_long_name", "secret123"),
        ("alicesmith", "short"),
    ] {
        let response = app.sign_up(username, password).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for {username:?}/{password:?}"
        );
    }
}

#[tokio::test]
async fn test_sign_up_malformed_body() {
    let app = TestApp::spawn().await;

    for body in [
        serde_json::json!({}),
        serde_json::json!({ "username": "alicesmith" }),
        serde_json::json!({ "username": "alicesmith", "password": 123456789 }),
    ] {
        let response = app
            .post("/auth/sign-up")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert!(body["message"].is_string());
    }

    let response = app
        .post("/auth/sign-up")
        .body("not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_fault_statuses() {
    let app = TestApp::spawn().await;

    app.sign_up("alicesmith", "secret123").await;

    sqlx::query("DROP TABLE users")
        .execute(&app.pool)
        .await
        .expect("Failed to drop users table");

    let response = app.sign_up("bobbyjones", "secret123").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Database error");

    let response = app.sign_in("alicesmith", "secret123").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(refresh_cookie(&response).is_none());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Username or password incorrect");
}

#[tokio::test]
async fn test_sign_in_success() {
    let app = TestApp::spawn().await;

    app.sign_up("alicesmith", "secret123").await;
    let response = app.sign_in("alicesmith", "secret123").await;

    assert_eq!(response.status(), StatusCode::OK);

    let (refresh_token, http_only) = refresh_cookie(&response).expect("refresh_token cookie");
    assert!(!refresh_token.is_empty());
    assert!(http_only);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body.get("refresh_token").is_none());

    let access_token = body["access_token"].as_str().expect("access_token");
    let payload: Payload = app
        .jwt_handler
        .verify(access_token)
        .expect("Access token should verify");
    assert_eq!(payload.username, "alicesmith");

    let refresh_payload: Payload = app
        .jwt_handler
        .verify(&refresh_token)
        .expect("Refresh token should verify");
    assert_eq!(refresh_payload, payload);
}

#[tokio::test]
async fn test_sign_in_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.sign_up("alicesmith", "secret123").await;

    let wrong_password = app.sign_in("alicesmith", "secret124").await;
    let unknown_user = app.sign_in("bobbyjones", "secret123").await;
    let invalid_username = app.sign_in("bob", "secret123").await;

    let mut responses = vec![wrong_password, unknown_user, invalid_username];
    for body in [
        serde_json::json!({}),
        serde_json::json!({ "username": "alicesmith" }),
        serde_json::json!({ "username": 5, "password": "x" }),
    ] {
        responses.push(
            app.post("/auth/sign-in")
                .json(&body)
                .send()
                .await
                .expect("Failed to execute request"),
        );
    }
    responses.push(
        app.post("/auth/sign-in")
            .body("username=alicesmith&password=secret123")
            .send()
            .await
            .expect("Failed to execute request"),
    );

    for response in responses {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(refresh_cookie(&response).is_none());

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["message"], "Username or password incorrect");
    }
}

#[tokio::test]
async fn test_refresh_with_cookie_store() {
    let app = TestApp::spawn().await;

    app.sign_up("alicesmith", "secret123").await;
    app.sign_in("alicesmith", "secret123").await;

    let response = app
        .get("/auth/refresh")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(refresh_cookie(&response).is_none());

    let access_token = access_token(response).await;
    let payload: Payload = app.jwt_handler.verify(&access_token).unwrap();
    assert_eq!(payload.username, "alicesmith");

    let response = app
        .post("/auth/refresh")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let app = TestApp::spawn().await;

    let response = client()
        .get(app.url("/auth/refresh"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_empty_cookie() {
    let app = TestApp::spawn().await;

    let response = client()
        .get(app.url("/auth/refresh"))
        .header(COOKIE, "refresh_token=")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_expired_token() {
    let app = TestApp::spawn().await;

    let expired = app
        .jwt_handler
        .issue(
            &Payload {
                sub: 1,
                username: "alicesmith".to_string(),
            },
            Some(Duration::seconds(-60)),
        )
        .unwrap();

    let response = client()
        .get(app.url("/auth/refresh"))
        .header(COOKIE, format!("refresh_token={}", expired))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_tampered_token() {
    let app = TestApp::spawn().await;

    app.sign_up("alicesmith", "secret123").await;
    let response = app.sign_in("alicesmith", "secret123").await;
    let (refresh_token, _) = refresh_cookie(&response).expect("refresh_token cookie");

    let mut tampered = refresh_token.clone();
    tampered.pop();
    tampered.push(if refresh_token.ends_with('A') { 'B' } else { 'A' });

    let response = client()
        .get(app.url("/auth/refresh"))
        .header(COOKIE, format!("refresh_token={}", tampered))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_does_not_rotate_or_revoke() {
    let app = TestApp::spawn().await;

    app.sign_up("alicesmith", "secret123").await;
    let response = app.sign_in("alicesmith", "secret123").await;
    let (refresh_token, _) = refresh_cookie(&response).expect("refresh_token cookie");
    let original_access_token = access_token(response).await;

    for _ in 0..2 {
        let response = client()
            .get(app.url("/auth/refresh"))
            .header(COOKIE, format!("refresh_token={}", refresh_token))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = client()
        .get(app.url("/auth/profile"))
        .header(AUTHORIZATION, format!("Bearer {}", original_access_token))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_profile_requires_bearer_token() {
    let app = TestApp::spawn().await;

    app.sign_up("alicesmith", "secret123").await;
    let access_token = access_token(app.sign_in("alicesmith", "secret123").await).await;

    let response = client()
        .get(app.url("/auth/profile"))
        .bearer_auth(&access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "alicesmith");
    assert!(body["id"].is_i64());

    let missing = client()
        .get(app.url("/auth/profile"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = client()
        .get(app.url("/auth/profile"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_alicesmith_end_to_end() {
    let app = TestApp::spawn().await;

    let response = app.sign_up("alicesmith", "secret123").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.sign_up("alicesmith", "secret123").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.sign_in("alicesmith", "secret123").await;
    assert_eq!(response.status(), StatusCode::OK);
    let (refresh_token, _) = refresh_cookie(&response).expect("refresh_token cookie");
    assert!(!refresh_token.is_empty());
    let first_access_token = access_token(response).await;
    assert!(!first_access_token.is_empty());

    let response = client()
        .get(app.url("/auth/refresh"))
        .header(COOKIE, format!("refresh_token={}", refresh_token))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let second_access_token = access_token(response).await;
    assert!(!second_access_token.is_empty());

    let first: Payload = app.jwt_handler.verify(&first_access_token).unwrap();
    let second: Payload = app.jwt_handler.verify(&second_access_token).unwrap();
    assert_eq!(first, second);

    let response = client()
        .get(app.url("/auth/refresh"))
        .header(COOKIE, "refresh_token=")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
