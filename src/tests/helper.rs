use axum::Router;
use axum::body::Body;
use axum::body::Bytes;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::json;
use tower::Service;
use uuid::Uuid;

use crate::database::DatabaseConfig;
use crate::setup_app;

/// Test helper version of User struct
#[derive(Debug, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[allow(dead_code)] // used by serde
    pub role: String,
    pub password: Option<String>,
}

/// Test helper version of Board struct
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub visibility_label: String,
}

/// Test helper version of Note struct
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub board_id: Uuid,
    pub color: String,
    pub archived: bool,
    pub archived_at: Option<String>,
    pub checklist_items: Vec<ChecklistItem>,
}

/// Test helper version of ChecklistItem struct
#[derive(Debug, Deserialize)]
pub struct ChecklistItem {
    pub id: Uuid,
    pub content: String,
    pub checked: bool,
    pub order: i32,
}

/// Test helper version of a dashboard card
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub kind: String,
    pub id: Option<Uuid>,
    pub href: String,
    pub name: String,
    pub visibility_label: Option<String>,
    pub notes_count: usize,
    pub notes_count_label: String,
    pub last_activity_at: Option<String>,
    pub activity_label: String,
}

/// Test helper version of a public board
#[derive(Debug, Deserialize)]
pub struct PublicBoard {
    pub board: Board,
    pub notes: Vec<Note>,
}

/// Error response
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct Error {
    pub error: String,
    pub description: Option<String>,
}

/// Setup the Stickies app
///
/// Inject some environment variables to match our tests
pub async fn setup_test_app(pool: sqlx::PgPool) -> Router {
    #[allow(unsafe_code)]
    unsafe {
        std::env::set_var("INITIAL_USERNAME", "admin");
        std::env::set_var("INITIAL_PASSWORD", "verysecret");
        std::env::set_var("JWT_SECRET", "verysecret");
    }

    setup_app(DatabaseConfig::ExistingConnection(pool))
        .await
        .unwrap()
}

/// Send a request to the app, with an optional JSON payload
pub async fn send(
    app: &mut Router,
    method: Method,
    uri: &str,
    access_token: Option<&str>,
    payload: Option<&Value>,
) -> (StatusCode, Bytes) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(access_token) = access_token {
        builder = builder.header(AUTHORIZATION, access_token);
    }

    let body = if let Some(payload) = payload {
        builder = builder.header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());

        Body::from(serde_json::to_vec(payload).unwrap())
    } else {
        Body::empty()
    };

    let request = builder.body(body).unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status_code, body)
}

async fn send_for<T: DeserializeOwned>(
    app: &mut Router,
    method: Method,
    uri: &str,
    access_token: Option<&str>,
    payload: Option<&Value>,
    expected_status_code: StatusCode,
) -> (StatusCode, Option<T>, Option<String>) {
    let (status_code, body) = send(app, method, uri, access_token, payload).await;

    (
        status_code,
        if status_code == expected_status_code {
            Some(get_data(&body))
        } else {
            None
        },
        if status_code.is_client_error() {
            Some(get_error_message(&body))
        } else {
            None
        },
    )
}

async fn send_delete(app: &mut Router, uri: &str, access_token: &str) -> (StatusCode, Option<String>) {
    let (status_code, body) = send(app, Method::DELETE, uri, Some(access_token), None).await;

    (
        status_code,
        if status_code.is_client_error() {
            Some(get_error_message(&body))
        } else {
            None
        },
    )
}

pub async fn login_with_password(app: &mut Router, password: &str) -> String {
    login_as(app, "admin", password).await
}

pub async fn login_as(app: &mut Router, username: &str, password: &str) -> String {
    let payload = json!({ "username": username, "password": password });

    let (status_code, body) =
        send(app, Method::POST, "/api/users/token", None, Some(&payload)).await;

    assert_eq!(StatusCode::OK, status_code);

    get_access_token(&body)
}

pub async fn login(app: &mut Router) -> String {
    login_with_password(app, "verysecret").await
}

pub async fn maybe_change_password(
    app: &mut Router,
    access_token: &str,
    current_password: &str,
    password: &str,
) -> (StatusCode, Option<String>, Option<String>) {
    let payload = json!({ "currentPassword": current_password, "password": password });

    let (status_code, body) = send(
        app,
        Method::PUT,
        "/api/users/me/password",
        Some(access_token),
        Some(&payload),
    )
    .await;

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_access_token(&body))
        } else {
            None
        },
        if status_code == StatusCode::BAD_REQUEST {
            Some(get_error_message(&body))
        } else {
            None
        },
    )
}

pub async fn current_user(app: &mut Router, access_token: &str) -> (StatusCode, Option<User>) {
    let (status_code, user, _) = send_for(
        app,
        Method::GET,
        "/api/users/me",
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await;

    (status_code, user)
}

pub async fn list_users(app: &mut Router, access_token: &str) -> (StatusCode, Option<Vec<User>>) {
    let (status_code, users, _) = send_for(
        app,
        Method::GET,
        "/api/users",
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await;

    (status_code, users)
}

pub async fn single_user(
    app: &mut Router,
    access_token: &str,
    id: &Uuid,
) -> (StatusCode, Option<User>, Option<String>) {
    send_for(
        app,
        Method::GET,
        &format!("/api/users/{id}"),
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await
}

pub async fn maybe_create_user_with_password(
    app: &mut Router,
    access_token: &str,
    username: &str,
    role: &str,
    password: Option<&str>,
) -> (StatusCode, Option<User>, Option<String>) {
    let mut payload = json!({ "username": username, "role": role });

    if let Some(password) = password {
        payload["password"] = Value::String(password.to_string());
    }

    send_for(
        app,
        Method::POST,
        "/api/users",
        Some(access_token),
        Some(&payload),
        StatusCode::CREATED,
    )
    .await
}

pub async fn maybe_create_user(
    app: &mut Router,
    access_token: &str,
    username: &str,
    role: &str,
) -> (StatusCode, Option<User>, Option<String>) {
    maybe_create_user_with_password(app, access_token, username, role, None).await
}

pub async fn maybe_delete_user(
    app: &mut Router,
    access_token: &str,
    id: &Uuid,
) -> (StatusCode, Option<String>) {
    send_delete(app, &format!("/api/users/{id}"), access_token).await
}

pub async fn list_boards(app: &mut Router, access_token: &str) -> (StatusCode, Option<Vec<Board>>) {
    let (status_code, boards, _) = send_for(
        app,
        Method::GET,
        "/api/boards",
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await;

    (status_code, boards)
}

pub async fn single_board(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
) -> (StatusCode, Option<Board>, Option<String>) {
    send_for(
        app,
        Method::GET,
        &format!("/api/boards/{board_id}"),
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await
}

pub async fn maybe_create_board(
    app: &mut Router,
    access_token: &str,
    name: &str,
    is_public: bool,
) -> (StatusCode, Option<Board>, Option<String>) {
    let payload = json!({ "name": name, "isPublic": is_public });

    send_for(
        app,
        Method::POST,
        "/api/boards",
        Some(access_token),
        Some(&payload),
        StatusCode::CREATED,
    )
    .await
}

/// Create a board that is expected to succeed
pub async fn create_board(app: &mut Router, access_token: &str, name: &str) -> Board {
    let (status_code, board, _) = maybe_create_board(app, access_token, name, false).await;
    assert_eq!(StatusCode::CREATED, status_code);

    board.unwrap()
}

pub async fn maybe_create_board_with_raw_body(
    app: &mut Router,
    access_token: &str,
    body: &'static str,
    include_content_type: bool,
) -> (StatusCode, Option<Error>) {
    let mut builder = Request::builder().method(Method::POST).uri("/api/boards");

    if include_content_type {
        builder = builder.header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
    }

    let request = builder
        .header(AUTHORIZATION, access_token)
        .body(Body::from(body.as_bytes()))
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (
        status_code,
        if status_code == StatusCode::BAD_REQUEST {
            Some(serde_json::from_slice(&body[..]).unwrap())
        } else {
            None
        },
    )
}

pub async fn maybe_update_board(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
    payload: &Value,
) -> (StatusCode, Option<Board>, Option<String>) {
    send_for(
        app,
        Method::PATCH,
        &format!("/api/boards/{board_id}"),
        Some(access_token),
        Some(payload),
        StatusCode::OK,
    )
    .await
}

pub async fn maybe_delete_board(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
) -> (StatusCode, Option<String>) {
    send_delete(app, &format!("/api/boards/{board_id}"), access_token).await
}

pub async fn list_notes(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
) -> (StatusCode, Option<Vec<Note>>) {
    let (status_code, notes, _) = send_for(
        app,
        Method::GET,
        &format!("/api/boards/{board_id}/notes"),
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await;

    (status_code, notes)
}

pub async fn single_note(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
    note_id: &Uuid,
) -> (StatusCode, Option<Note>, Option<String>) {
    send_for(
        app,
        Method::GET,
        &format!("/api/boards/{board_id}/notes/{note_id}"),
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await
}

pub async fn maybe_create_note(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
    payload: &Value,
) -> (StatusCode, Option<Note>, Option<String>) {
    send_for(
        app,
        Method::POST,
        &format!("/api/boards/{board_id}/notes"),
        Some(access_token),
        Some(payload),
        StatusCode::CREATED,
    )
    .await
}

/// Create a note with the default color that is expected to succeed
pub async fn create_note(app: &mut Router, access_token: &str, board_id: &Uuid) -> Note {
    let (status_code, note, _) = maybe_create_note(app, access_token, board_id, &json!({})).await;
    assert_eq!(StatusCode::CREATED, status_code);

    note.unwrap()
}

pub async fn maybe_update_note(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
    note_id: &Uuid,
    payload: &Value,
) -> (StatusCode, Option<Note>, Option<String>) {
    send_for(
        app,
        Method::PATCH,
        &format!("/api/boards/{board_id}/notes/{note_id}"),
        Some(access_token),
        Some(payload),
        StatusCode::OK,
    )
    .await
}

pub async fn maybe_delete_note(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
    note_id: &Uuid,
) -> (StatusCode, Option<String>) {
    send_delete(
        app,
        &format!("/api/boards/{board_id}/notes/{note_id}"),
        access_token,
    )
    .await
}

pub async fn list_checklist_items(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
    note_id: &Uuid,
) -> (StatusCode, Option<Vec<ChecklistItem>>) {
    let (status_code, checklist_items, _) = send_for(
        app,
        Method::GET,
        &format!("/api/boards/{board_id}/notes/{note_id}/checklist-items"),
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await;

    (status_code, checklist_items)
}

pub async fn single_checklist_item(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
    note_id: &Uuid,
    checklist_item_id: &Uuid,
) -> (StatusCode, Option<ChecklistItem>, Option<String>) {
    send_for(
        app,
        Method::GET,
        &format!("/api/boards/{board_id}/notes/{note_id}/checklist-items/{checklist_item_id}"),
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await
}

pub async fn maybe_create_checklist_item(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
    note_id: &Uuid,
    payload: &Value,
) -> (StatusCode, Option<ChecklistItem>, Option<String>) {
    send_for(
        app,
        Method::POST,
        &format!("/api/boards/{board_id}/notes/{note_id}/checklist-items"),
        Some(access_token),
        Some(payload),
        StatusCode::CREATED,
    )
    .await
}

pub async fn maybe_update_checklist_item(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
    note_id: &Uuid,
    checklist_item_id: &Uuid,
    payload: &Value,
) -> (StatusCode, Option<ChecklistItem>, Option<String>) {
    send_for(
        app,
        Method::PATCH,
        &format!("/api/boards/{board_id}/notes/{note_id}/checklist-items/{checklist_item_id}"),
        Some(access_token),
        Some(payload),
        StatusCode::OK,
    )
    .await
}

pub async fn maybe_delete_checklist_item(
    app: &mut Router,
    access_token: &str,
    board_id: &Uuid,
    note_id: &Uuid,
    checklist_item_id: &Uuid,
) -> (StatusCode, Option<String>) {
    send_delete(
        app,
        &format!("/api/boards/{board_id}/notes/{note_id}/checklist-items/{checklist_item_id}"),
        access_token,
    )
    .await
}

pub async fn all_notes(app: &mut Router, access_token: &str) -> (StatusCode, Option<Vec<Note>>) {
    let (status_code, notes, _) = send_for(
        app,
        Method::GET,
        "/api/notes",
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await;

    (status_code, notes)
}

pub async fn archived_notes(
    app: &mut Router,
    access_token: &str,
) -> (StatusCode, Option<Vec<Note>>) {
    let (status_code, notes, _) = send_for(
        app,
        Method::GET,
        "/api/notes/archive",
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await;

    (status_code, notes)
}

pub async fn dashboard(app: &mut Router, access_token: &str) -> (StatusCode, Option<Vec<Card>>) {
    let (status_code, cards, _) = send_for(
        app,
        Method::GET,
        "/api/dashboard",
        Some(access_token),
        None,
        StatusCode::OK,
    )
    .await;

    (status_code, cards)
}

pub async fn public_board(
    app: &mut Router,
    board_id: &Uuid,
) -> (StatusCode, Option<PublicBoard>, Option<String>) {
    send_for(
        app,
        Method::GET,
        &format!("/api/public/boards/{board_id}"),
        None,
        None,
        StatusCode::OK,
    )
    .await
}

fn get_data<T: DeserializeOwned>(body: &Bytes) -> T {
    let mut value = serde_json::from_slice::<Value>(&body[..]).unwrap();

    serde_json::from_value(value["data"].take()).unwrap()
}

pub fn get_error_message(body: &Bytes) -> String {
    serde_json::from_slice::<Value>(&body[..]).unwrap()["error"]
        .as_str()
        .map(ToString::to_string)
        .unwrap()
}

fn get_access_token(body: &Bytes) -> String {
    serde_json::from_slice::<Value>(&body[..]).unwrap()["data"]["access_token"]
        .as_str()
        .map(|access_token| format!("Bearer {access_token}"))
        .unwrap()
}
