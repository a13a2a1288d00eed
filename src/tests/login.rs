use axum::http::Method;
use axum::http::StatusCode;
use serde_json::json;

use crate::tests::helper;

#[sqlx::test]
async fn test_login(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::login(&mut app).await;
    assert!(access_token.len() > 10);
}

#[sqlx::test]
async fn test_login_wrong_password(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let payload = json!({ "username": "admin", "password": "wrongpassword" });
    let (status_code, body) = helper::send(
        &mut app,
        Method::POST,
        "/api/users/token",
        None,
        Some(&payload),
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Invalid user", helper::get_error_message(&body));
}

#[sqlx::test]
async fn test_missing_or_invalid_token(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let (status_code, body) = helper::send(&mut app, Method::GET, "/api/boards", None, None).await;
    assert_eq!(StatusCode::FORBIDDEN, status_code);
    assert_eq!("Missing API token", helper::get_error_message(&body));

    let (status_code, _) = helper::send(
        &mut app,
        Method::GET,
        "/api/boards",
        Some("Bearer nottherighttoken"),
        None,
    )
    .await;
    assert_eq!(StatusCode::FORBIDDEN, status_code);
}

#[sqlx::test]
async fn test_unknown_route(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let (status_code, body) = helper::send(&mut app, Method::GET, "/nothing-here", None, None).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Not found", helper::get_error_message(&body));
}
