//! User API management

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::database::AuditEntry;
use crate::database::ChangePasswordValues;
use crate::database::CreateUserValues;
use crate::database::Database;
use crate::password::generate;
use crate::password::hash;
use crate::password::verify;
use crate::users::Role;
use crate::users::User;

use super::AuditTrail;
use super::CurrentUser;
use super::Error;
use super::Form;
use super::JwtKeys;
use super::PathParameters;
use super::Success;
use super::current_user::Token;
use super::current_user::generate_token;

/// The user response information
///
/// A subset of all the information, ready to be serialized for the outside world
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// The user ID
    pub id: Uuid,

    /// The organization of the user
    pub organization_id: Uuid,

    /// The username
    pub username: String,

    /// The role of the user
    pub role: Role,

    /// The password, only when newly generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserResponse {
    /// Create a user response from a [`User`](User)
    fn from_user(user: User) -> Self {
        Self {
            id: user.id,
            organization_id: user.organization_id,
            username: user.username,
            role: user.role,
            password: None,
        }
    }

    /// Add a password to the user response
    ///
    /// This is explicit extra action to take, to make sure this is really what you want to do
    fn set_password(&mut self, password: &str) {
        self.password = Some(password.to_string());
    }
}

/// Login form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    /// Username of the user
    username: String,
    /// Password of the user
    password: String,
}

/// Get a token for a user "session"
///
/// The token can then be used to access the rest of the API routes by using it in the
/// `Authorization` header
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "username": "admin", "password": "verysecret" }' \
///     http://localhost:6000/api/users/token
/// ```
///
/// Response
/// ```json
/// { "data": { "token_type": "Bearer", "expires_in": 3600, "access_token": "some token" } }
/// ```
pub async fn token(
    Extension(jwt_keys): Extension<JwtKeys>,
    Extension(database): Extension<Database>,
    Form(form): Form<LoginForm>,
) -> Result<Success<Token>, Error> {
    let user = database
        .find_single_user_by_username(&form.username)
        .await
        .map_err(Error::internal_server_error)?;

    match user {
        Some(user) if verify(&user.hashed_password, &form.password) => {
            generate_token(&jwt_keys, &user).map(Success::ok)
        }
        _ => Err(Error::bad_request("Invalid user")),
    }
}

/// List all users of the organization
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/users
/// ```
pub async fn list(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
) -> Result<Success<Vec<UserResponse>>, Error> {
    current_user.role.is_allowed(Role::Admin)?;

    let users = database
        .find_all_users(&current_user.organization_id)
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(
        users.into_iter().map(UserResponse::from_user).collect(),
    ))
}

/// Get the current user
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/users/me
/// ```
pub async fn me(current_user: CurrentUser) -> Result<Success<UserResponse>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    Ok(Success::ok(UserResponse::from_user(
        (*current_user).clone(),
    )))
}

/// Get a single user of the organization
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/users/<uuid>
/// ```
pub async fn single(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(user_id): PathParameters<Uuid>,
) -> Result<Success<UserResponse>, Error> {
    current_user.role.is_allowed(Role::Admin)?;

    fetch_user(&database, &current_user, &user_id)
        .await
        .map(|user| Success::ok(UserResponse::from_user(user)))
}

/// Create user form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserForm {
    /// Role of the new user
    role: Role,
    /// Username of the new user
    username: String,
    /// Optional password of the new user
    ///
    /// When not provided a new password will be generated and returned in the response, this will
    /// be the only time the password is visible -- make sure to capture it.
    password: Option<String>,
}

/// Create a user in the organization of the current user
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "role": "manager", "username": "some-other-username" }' \
///     http://localhost:6000/api/users
/// ```
///
/// Response
/// ```json
/// { "data": { "id": "<uuid>", "username": "some-other-username", "password": "veryverysecret" } }
/// ```
pub async fn create(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    Form(form): Form<CreateUserForm>,
) -> Result<Success<UserResponse>, Error> {
    current_user.role.is_allowed(Role::Admin)?;

    let existing_user = database
        .find_single_user_by_username_unchecked(&form.username)
        .await
        .map_err(Error::internal_server_error)?;

    if let Some(existing_user) = existing_user {
        return if existing_user.is_deleted() {
            Err(Error::bad_request("User already exists and is deleted"))
        } else {
            Err(Error::bad_request("User already exists"))
        };
    }

    let (is_generated, password) = match form.password {
        Some(password) => (false, password),
        None => (true, generate()),
    };

    let hashed_password = hash(&password).map_err(Error::internal_server_error)?;

    let values = CreateUserValues {
        organization_id: &current_user.organization_id,
        session_id: &Uuid::new_v4(),
        role: form.role,
        username: &form.username,
        hashed_password: &hashed_password,
    };

    let user = database
        .create_user(&values)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail.register(AuditEntry::CreateUser(&user)).await;

    let mut response = UserResponse::from_user(user);

    // only add the generated password, its the only time the password is known to anybody
    if is_generated {
        response.set_password(&password);
    }

    Ok(Success::created(response))
}

/// Change password form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordForm {
    /// Current password for verification
    current_password: String,
    /// New (optional) password
    ///
    /// When not provided a new password will be generated
    password: Option<String>,
}

/// Change the password of the current user
///
/// Changing your password will invalidate your current access token, a new token is returned
///
/// Request:
/// ```sh
/// curl -v -XPUT -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "currentPassword": "verysecret", "password": "veryverysecret" }' \
///     http://localhost:6000/api/users/me/password
/// ```
pub async fn change_own_password(
    audit_trail: AuditTrail,
    Extension(jwt_keys): Extension<JwtKeys>,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Success<Token>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let user = (*current_user).clone();

    update_password(&audit_trail, &jwt_keys, &database, &user, form).await
}

/// Change the password of a user of the organization
pub async fn change_password(
    audit_trail: AuditTrail,
    Extension(jwt_keys): Extension<JwtKeys>,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(user_id): PathParameters<Uuid>,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Success<Token>, Error> {
    current_user.role.is_allowed(Role::Admin)?;

    let user = fetch_user(&database, &current_user, &user_id).await?;

    update_password(&audit_trail, &jwt_keys, &database, &user, form).await
}

/// Delete a user of the organization
///
/// Request:
/// ```sh
/// curl -v -XDELETE \
///     -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/users/<uuid>
/// ```
pub async fn delete(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(user_id): PathParameters<Uuid>,
) -> Result<Success<&'static str>, Error> {
    current_user.role.is_allowed(Role::Admin)?;

    if user_id == current_user.id {
        return Err(Error::bad_request("Can not delete yourself"));
    }

    let user = fetch_user(&database, &current_user, &user_id).await?;

    database
        .delete_user(&user)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail.register(AuditEntry::DeleteUser(&user)).await;

    Ok(Success::<&'static str>::no_content())
}

/// Verify the current password and store the new one with a fresh session
async fn update_password(
    audit_trail: &AuditTrail,
    jwt_keys: &JwtKeys,
    database: &Database,
    user: &User,
    form: ChangePasswordForm,
) -> Result<Success<Token>, Error> {
    if !verify(&user.hashed_password, &form.current_password) {
        return Err(Error::bad_request("Invalid password"));
    }

    let password = form.password.unwrap_or_else(generate);
    let hashed_password = hash(&password).map_err(Error::internal_server_error)?;

    let values = ChangePasswordValues {
        session_id: &Uuid::new_v4(),
        hashed_password: &hashed_password,
    };

    let updated_user = database
        .change_password(user, &values)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail
        .register(AuditEntry::ChangePassword(&updated_user))
        .await;

    generate_token(jwt_keys, &updated_user).map(Success::ok)
}

/// Fetch a user of the same organization as the current user
async fn fetch_user(
    database: &Database,
    current_user: &CurrentUser,
    user_id: &Uuid,
) -> Result<User, Error> {
    database
        .find_single_user_by_id(user_id)
        .await
        .map_err(Error::internal_server_error)?
        .filter(|user| user.organization_id == current_user.organization_id)
        .map_or_else(|| Err(Error::not_found("User not found")), Ok)
}
