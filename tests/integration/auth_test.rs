//! Integration tests for the session flows.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_login_success_sets_refresh_cookie() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "Str0ng!Pass").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "a@x.com", "password": "Str0ng!Pass" })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("access_token").is_some());
    // The refresh token never appears in the body.
    assert!(response.body.get("refresh_token").is_none());

    let refresh_token = response.refresh_cookie_value().unwrap();
    assert!(refresh_token.len() >= 36);

    let cookie = response
        .set_cookie_headers()
        .into_iter()
        .find(|c| c.starts_with("refresh_token="))
        .unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/api/auth/refresh"));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.create_test_user("known@x.com", "Str0ng!Pass").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "known@x.com", "password": "WrongPass1!" })),
            None,
            None,
        )
        .await;

    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "nobody@x.com", "password": "Str0ng!Pass" })),
            None,
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_unauthorized_response_clears_refresh_cookie() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "nobody@x.com", "password": "whatever" })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let removal = response
        .set_cookie_headers()
        .into_iter()
        .find(|c| c.starts_with("refresh_token="))
        .expect("401 must clear the refresh cookie");
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_refresh_rotates_to_new_pair() {
    let app = TestApp::new().await;
    let user_id = app.create_test_user("a@x.com", "Str0ng!Pass").await;
    let (access_token, refresh_token) = app.login("a@x.com", "Str0ng!Pass").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(&access_token),
            Some(&format!("refresh_token={refresh_token}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let new_access = response.body.get("access_token").unwrap().as_str().unwrap();
    assert_ne!(new_access, access_token);

    let new_refresh = response.refresh_cookie_value().unwrap();
    assert_ne!(new_refresh, refresh_token);

    // Default rotation is additive: the consumed record is still there.
    assert_eq!(app.refresh_token_count(user_id).await, 2);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_refresh_with_never_issued_token() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "Str0ng!Pass").await;
    let (access_token, _) = app.login("a@x.com", "Str0ng!Pass").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(&access_token),
            Some("refresh_token=this-token-was-never-issued"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_refresh_rejects_cross_account_replay() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "Str0ng!Pass").await;
    app.create_test_user("b@x.com", "Str0ng!Pass").await;

    let (access_a, _) = app.login("a@x.com", "Str0ng!Pass").await;
    let (_, refresh_b) = app.login("b@x.com", "Str0ng!Pass").await;

    // B's token presented under A's identity must not resolve.
    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(&access_a),
            Some(&format!("refresh_token={refresh_b}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_refresh_without_cookie() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "Str0ng!Pass").await;
    let (access_token, _) = app.login("a@x.com", "Str0ng!Pass").await;

    let response = app
        .request("POST", "/api/auth/refresh", None, Some(&access_token), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_federated_login_reuses_existing_account() {
    let app = TestApp::new().await;
    let existing_id = app.create_test_user("a@x.com", "Str0ng!Pass").await;

    let response = app
        .request(
            "POST",
            "/api/auth/federated/google",
            Some(serde_json::json!({
                "provider_id": "google-oauth2-1234",
                "email": "a@x.com",
                "display_name": "Ada",
            })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let location = response
        .headers
        .get(http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(location.contains("/auth/success?accessToken="));

    // No duplicate account was created, and the tokens belong to it.
    assert_eq!(app.user_count().await, 1);
    assert_eq!(app.refresh_token_count(existing_id).await, 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_federated_login_creates_password_less_account() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/federated/google",
            Some(serde_json::json!({
                "provider_id": "google-oauth2-5678",
                "email": "new@x.com",
                "display_name": "Newcomer",
            })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let password_hash: Option<String> =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE email = 'new@x.com'")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert!(password_hash.is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_federated_login_without_email_is_server_fault() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/federated/google",
            Some(serde_json::json!({ "provider_id": "google-oauth2-9999" })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_register_then_login() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "fresh@x.com",
                "password": "vx7#Qm!plover-Trenches",
                "confirm_password": "vx7#Qm!plover-Trenches",
            })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body.get("password_hash").is_none());

    let duplicate = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "fresh@x.com",
                "password": "vx7#Qm!plover-Trenches",
                "confirm_password": "vx7#Qm!plover-Trenches",
            })),
            None,
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    app.login("fresh@x.com", "vx7#Qm!plover-Trenches").await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_refresh_rejects_expired_record() {
    let app = TestApp::new().await;
    let user_id = app.create_test_user("a@x.com", "Str0ng!Pass").await;
    let (access_token, _) = app.login("a@x.com", "Str0ng!Pass").await;

    // A record past expiry that the sweep has not reached yet.
    sqlx::query(
        "INSERT INTO refresh_tokens (user_id, token, expires_at) VALUES ($1, $2, NOW() - INTERVAL '1 hour')",
    )
    .bind(user_id)
    .bind("stale-but-not-swept")
    .execute(&app.db_pool)
    .await
    .unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(&access_token),
            Some("refresh_token=stale-but-not-swept"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_deleting_user_cascades_tokens() {
    let app = TestApp::new().await;
    let user_id = app.create_test_user("a@x.com", "Str0ng!Pass").await;
    app.login("a@x.com", "Str0ng!Pass").await;
    assert_eq!(app.refresh_token_count(user_id).await, 1);

    let users = keygate_database::repositories::UserRepository::new(app.db_pool.clone());
    assert!(users.delete(user_id).await.unwrap());

    assert_eq!(app.refresh_token_count(user_id).await, 0);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_profile() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "Str0ng!Pass").await;
    let (access_token, _) = app.login("a@x.com", "Str0ng!Pass").await;

    let response = app
        .request(
            "PUT",
            "/api/users/me",
            Some(serde_json::json!({ "display_name": "Renamed" })),
            Some(&access_token),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("display_name").unwrap(), "Renamed");
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_me_requires_valid_token() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "Str0ng!Pass").await;
    let (access_token, _) = app.login("a@x.com", "Str0ng!Pass").await;

    let response = app
        .request("GET", "/api/users/me", None, Some(&access_token), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("email").unwrap(), "a@x.com");

    let anonymous = app.request("GET", "/api/users/me", None, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}
