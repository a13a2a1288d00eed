use axum::http::Method;
use axum::http::StatusCode;
use serde_json::json;

use crate::tests::helper;

#[sqlx::test]
async fn test_notes(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::login(&mut app).await;

    let board = helper::create_board(&mut app, &access_token, "Roadmap").await;

    // verify empty note list
    let (status_code, notes) = helper::list_notes(&mut app, &access_token, &board.id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(notes.unwrap().is_empty());

    // create note with default color
    let note = helper::create_note(&mut app, &access_token, &board.id).await;
    assert_eq!(board.id, note.board_id);
    assert_eq!("#fef3c7".to_string(), note.color);
    assert!(!note.archived);
    assert!(note.checklist_items.is_empty());

    // create note with color and checklist items
    let (status_code, other_note, _) = helper::maybe_create_note(
        &mut app,
        &access_token,
        &board.id,
        &json!({
            "color": "#DBEAFE",
            "checklistItems": [
                { "content": "Second", "order": 2 },
                { "content": " First ", "checked": true, "order": 1 },
            ],
        }),
    )
    .await;
    assert_eq!(StatusCode::CREATED, status_code);
    let other_note = other_note.unwrap();
    assert_eq!("#dbeafe".to_string(), other_note.color);
    assert_eq!(2, other_note.checklist_items.len());

    // checklist items come in order
    let (status_code, single, _) =
        helper::single_note(&mut app, &access_token, &board.id, &other_note.id).await;
    assert_eq!(StatusCode::OK, status_code);
    let single = single.unwrap();
    assert_eq!("First".to_string(), single.checklist_items[0].content);
    assert!(single.checklist_items[0].checked);
    assert_eq!(1, single.checklist_items[0].order);
    assert_eq!("Second".to_string(), single.checklist_items[1].content);
    assert!(!single.checklist_items[1].checked);

    // newest note first
    let (status_code, notes) = helper::list_notes(&mut app, &access_token, &board.id).await;
    assert_eq!(StatusCode::OK, status_code);
    let notes = notes.unwrap();
    assert_eq!(2, notes.len());
    assert_eq!(other_note.id, notes[0].id);
    assert_eq!(note.id, notes[1].id);

    // update color
    let (status_code, updated, _) = helper::maybe_update_note(
        &mut app,
        &access_token,
        &board.id,
        &note.id,
        &json!({ "color": "#fff" }),
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("#fff".to_string(), updated.unwrap().color);

    // delete note
    let (status_code, _) =
        helper::maybe_delete_note(&mut app, &access_token, &board.id, &note.id).await;
    assert_eq!(StatusCode::NO_CONTENT, status_code);

    // verify note
    let (status_code, _, error) =
        helper::single_note(&mut app, &access_token, &board.id, &note.id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Note not found".to_string()), error);

    let (_, notes) = helper::list_notes(&mut app, &access_token, &board.id).await;
    assert_eq!(1, notes.unwrap().len());
}

#[sqlx::test]
async fn test_note_archive(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::login(&mut app).await;

    let board = helper::create_board(&mut app, &access_token, "Roadmap").await;
    let note = helper::create_note(&mut app, &access_token, &board.id).await;

    // archive
    let (status_code, archived, _) = helper::maybe_update_note(
        &mut app,
        &access_token,
        &board.id,
        &note.id,
        &json!({ "archived": true }),
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);
    let archived = archived.unwrap();
    assert!(archived.archived);
    assert!(archived.archived_at.is_some());

    // no longer on the board
    let (_, notes) = helper::list_notes(&mut app, &access_token, &board.id).await;
    assert!(notes.unwrap().is_empty());

    // but still reachable
    let (status_code, single, _) =
        helper::single_note(&mut app, &access_token, &board.id, &note.id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(single.unwrap().archived);

    // archiving again keeps the archive date
    let (status_code, archived_again, _) = helper::maybe_update_note(
        &mut app,
        &access_token,
        &board.id,
        &note.id,
        &json!({ "archived": true }),
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(archived.archived_at, archived_again.unwrap().archived_at);

    // restore
    let (status_code, restored, _) = helper::maybe_update_note(
        &mut app,
        &access_token,
        &board.id,
        &note.id,
        &json!({ "archived": false }),
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);
    let restored = restored.unwrap();
    assert!(!restored.archived);
    assert!(restored.archived_at.is_none());

    let (_, notes) = helper::list_notes(&mut app, &access_token, &board.id).await;
    assert_eq!(1, notes.unwrap().len());
}

#[sqlx::test]
async fn test_note_invalid_color(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::login(&mut app).await;

    let board = helper::create_board(&mut app, &access_token, "Roadmap").await;

    let (status_code, _, error) = helper::maybe_create_note(
        &mut app,
        &access_token,
        &board.id,
        &json!({ "color": "yellow" }),
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Invalid color".to_string()), error);

    let note = helper::create_note(&mut app, &access_token, &board.id).await;

    let (status_code, _, error) = helper::maybe_update_note(
        &mut app,
        &access_token,
        &board.id,
        &note.id,
        &json!({ "color": "#12345" }),
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Invalid color".to_string()), error);

    // empty checklist item content
    let (status_code, _, error) = helper::maybe_create_note(
        &mut app,
        &access_token,
        &board.id,
        &json!({ "checklistItems": [{ "content": " " }] }),
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Content can not be empty".to_string()), error);
}

#[sqlx::test]
async fn test_note_invalid_id(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::login(&mut app).await;

    let board = helper::create_board(&mut app, &access_token, "Roadmap").await;

    let (status_code, body) = helper::send(
        &mut app,
        Method::GET,
        &format!("/api/boards/{}/notes/not-a-uuid", board.id),
        Some(&access_token),
        None,
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Invalid path parameter", helper::get_error_message(&body));
}

#[sqlx::test]
async fn test_notes_of_deleted_board(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::login(&mut app).await;

    let board = helper::create_board(&mut app, &access_token, "Roadmap").await;
    let note = helper::create_note(&mut app, &access_token, &board.id).await;

    let (status_code, _) = helper::maybe_delete_board(&mut app, &access_token, &board.id).await;
    assert_eq!(StatusCode::NO_CONTENT, status_code);

    let (status_code, _, error) =
        helper::single_note(&mut app, &access_token, &board.id, &note.id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Board not found".to_string()), error);
}
