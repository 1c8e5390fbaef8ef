use serde_json::json;

mod unit;

const BASE_URL: &str = "http://127.0.0.1:8000";

#[tokio::test]
#[ignore = "requires running server"]
async fn health_reports_ok() {
    let response = reqwest::get(format!("{}/health", BASE_URL))
        .await
        .expect("Failed to reach server");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], true);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn protected_route_without_token_is_rejected() {
    let response = reqwest::get(format!("{}/auth/me", BASE_URL))
        .await
        .expect("Failed to reach server");

    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn login_with_wrong_password_is_rejected() {
    let response = reqwest::Client::new()
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": "nobody@example.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to reach server");

    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn malformed_login_body_is_a_validation_error() {
    let response = reqwest::Client::new()
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": "not-an-email", "password": "" }))
        .send()
        .await
        .expect("Failed to reach server");

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
}
