//! End-to-end flows against PostgreSQL: listing users, logout revocation and
//! token refresh.

mod common;

use axum::http::StatusCode;
use common::{TestDb, app, get, post, register, send};

#[tokio::test]
#[ignore = "needs PostgreSQL via DATABASE_URL"]
async fn list_users_returns_every_user() {
    let db = TestDb::migrated().await;
    let app = app(db.pool.clone());

    let (token, _) = register(&app, "ada").await;
    register(&app, "grace").await;
    register(&app, "linus").await;

    let (status, json) = send(&app, get("/api/users", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let users = json["data"].as_array().expect("data array");
    let stored = db.user_count().await;
    assert_eq!(users.len() as i64, stored);
    assert_eq!(users.len(), 3);
    for user in users {
        assert!(user["id"].is_i64());
        assert!(user["username"].is_string());
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("password_hash").is_none());
    }

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "needs PostgreSQL via DATABASE_URL"]
async fn logout_revokes_access_token() {
    let db = TestDb::migrated().await;
    let app = app(db.pool.clone());
    let (token, _) = register(&app, "ada").await;

    let (status, _) = send(&app, get("/api/users", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(
        &app,
        post("/api/auth/logout", Some(&token), serde_json::json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["success"], true);

    let (status, json) = send(&app, get("/api/users", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Token has been revoked");
    assert!(json.get("data").is_none());

    let revoked = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM revoked_tokens")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(revoked, 1);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "needs PostgreSQL via DATABASE_URL"]
async fn refresh_issues_working_access_token_until_revoked() {
    let db = TestDb::migrated().await;
    let app = app(db.pool.clone());
    let (_, refresh) = register(&app, "ada").await;

    let (status, json) = send(
        &app,
        post("/api/auth/refresh", Some(&refresh), serde_json::json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["tokenType"], "Bearer");
    let access = json["data"]["accessToken"].as_str().unwrap().to_string();

    let (status, _) = send(&app, get("/api/users", Some(&access))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        post("/api/auth/logout/refresh", Some(&refresh), serde_json::json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        post("/api/auth/refresh", Some(&refresh), serde_json::json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "needs PostgreSQL via DATABASE_URL"]
async fn login_checks_password() {
    let db = TestDb::migrated().await;
    let app = app(db.pool.clone());
    register(&app, "ada").await;

    let (status, json) = send(
        &app,
        post(
            "/api/auth/login",
            None,
            serde_json::json!({"username": "ada", "password": "wrong password"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid credentials");

    let (status, json) = send(
        &app,
        post(
            "/api/auth/login",
            None,
            serde_json::json!({"username": "ada", "password": "correct horse battery"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["user"]["username"], "ada");
    assert_eq!(json["data"]["expiresIn"], 900);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "needs PostgreSQL via DATABASE_URL"]
async fn register_rejects_duplicates_and_short_passwords() {
    let db = TestDb::migrated().await;
    let app = app(db.pool.clone());
    register(&app, "ada").await;

    let (status, json) = send(
        &app,
        post(
            "/api/auth/register",
            None,
            serde_json::json!({"username": "ada", "password": "another password"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");

    let (status, _) = send(
        &app,
        post(
            "/api/auth/register",
            None,
            serde_json::json!({"username": "grace", "password": "short"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "needs PostgreSQL via DATABASE_URL"]
async fn login_accepts_username_as_registered() {
    let db = TestDb::migrated().await;
    let app = app(db.pool.clone());
    let credentials = serde_json::json!({
        "username": " ada ",
        "password": "correct horse battery",
    });

    let (status, json) = send(&app, post("/api/auth/register", None, credentials.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["user"]["username"], "ada");

    let (status, json) = send(&app, post("/api/auth/login", None, credentials)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {json}");
    assert_eq!(json["data"]["user"]["username"], "ada");

    db.cleanup().await;
}
