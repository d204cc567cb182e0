//! Integration tests for the expired refresh token sweep.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use keygate_database::repositories::RefreshTokenRepository;
use keygate_worker::TokenReclaimer;

use crate::helpers::TestApp;

async fn insert_token(app: &TestApp, user_id: Uuid, token: &str, expires_in_secs: i64) {
    sqlx::query("INSERT INTO refresh_tokens (user_id, token, expires_at) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(token)
        .bind(Utc::now() + Duration::seconds(expires_in_secs))
        .execute(&app.db_pool)
        .await
        .expect("Failed to insert refresh token");
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_sweep_removes_only_expired_tokens() {
    let app = TestApp::new().await;
    let user_id = app.create_test_user("a@x.com", "Str0ng!Pass").await;

    insert_token(&app, user_id, "expired-one", -3600).await;
    insert_token(&app, user_id, "expired-two", -1).await;
    insert_token(&app, user_id, "still-live", 3600).await;

    let tokens = Arc::new(RefreshTokenRepository::new(app.db_pool.clone()));
    let removed = TokenReclaimer::new(Arc::clone(&tokens))
        .run_sweep()
        .await
        .unwrap();

    assert_eq!(removed, 2);
    assert_eq!(app.refresh_token_count(user_id).await, 1);

    // The surviving record is still usable for an exact-match lookup.
    let live = tokens
        .find_by_user_and_token(user_id, "still-live")
        .await
        .unwrap();
    assert!(live.is_some());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_sweep_is_quiet_when_nothing_expired() {
    let app = TestApp::new().await;
    let user_id = app.create_test_user("a@x.com", "Str0ng!Pass").await;

    insert_token(&app, user_id, "still-live", 3600).await;

    let tokens = Arc::new(RefreshTokenRepository::new(app.db_pool.clone()));
    let reclaimer = TokenReclaimer::new(tokens);

    assert_eq!(reclaimer.run_sweep().await.unwrap(), 0);
    // Repeated runs stay a no-op.
    assert_eq!(reclaimer.run_sweep().await.unwrap(), 0);
    assert_eq!(app.refresh_token_count(user_id).await, 1);
}
