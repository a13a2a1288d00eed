//! All API endpoint setup

use axum::Router;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;

pub use audit_trail::AuditTrail;
pub use current_user::CurrentUser;
pub use current_user::JwtKeys;
pub use request::Form;
pub use request::PathParameters;
pub use request::parse_color;
pub use request::parse_content;
pub use request::parse_description;
pub use request::parse_name;
pub use response::Error;
pub use response::Success;

mod audit_trail;
mod boards;
mod checklist_items;
mod current_user;
mod dashboard;
mod notes;
mod public;
mod request;
mod response;
mod users;
mod utils;

/// Get the Axum router for all API routes
pub fn router() -> Router {
    let users = Router::new()
        .route("/token", post(users::token))
        .route("/", get(users::list).post(users::create))
        .route("/me", get(users::me))
        .route("/me/password", put(users::change_own_password))
        .route("/{user}", get(users::single).delete(users::delete))
        .route("/{user}/password", put(users::change_password));

    let checklist_items = Router::new()
        .route(
            "/",
            get(checklist_items::list).post(checklist_items::create),
        )
        .route(
            "/{checklist_item}",
            get(checklist_items::single)
                .patch(checklist_items::update)
                .delete(checklist_items::delete),
        );

    let notes = Router::new()
        .route("/", get(notes::list).post(notes::create))
        .route(
            "/{note}",
            get(notes::single).patch(notes::update).delete(notes::delete),
        )
        .nest("/{note}/checklist-items", checklist_items);

    let boards = Router::new()
        .route("/", get(boards::list).post(boards::create))
        .route(
            "/{board}",
            get(boards::single).patch(boards::update).delete(boards::delete),
        )
        .nest("/{board}/notes", notes);

    Router::new()
        .nest("/users", users)
        .nest("/boards", boards)
        .route("/notes", get(notes::all))
        .route("/notes/archive", get(notes::archive))
        .route("/dashboard", get(dashboard::cards))
        .route("/public/boards/{board}", get(public::board))
}
