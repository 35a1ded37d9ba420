//! Defines the endpoint for updating a user.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use rusqlite::{Connection, params};
use serde::Deserialize;

use crate::{
    Error, PasswordHash, ValidatedPassword,
    app_state::ResourceState,
    ownership::Owned,
    user::{User, UserID, UserJson, get_user_by_id},
    validation::{validate_email, validate_optional_text, validate_text},
};

/// The fields of a user that may be changed. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditUserForm {
    /// The new username.
    pub username: Option<String>,
    /// The new email address.
    pub email: Option<String>,
    /// The new plain text password.
    pub password: Option<String>,
    /// Whether the user has confirmed their email address.
    pub confirmed: Option<bool>,
    /// The new first name, a blank string clears it.
    pub first_name: Option<String>,
    /// The new last name, a blank string clears it.
    pub last_name: Option<String>,
}

/// A route handler for updating a user, only the user themself may do this.
pub async fn edit_user_endpoint(
    State(state): State<ResourceState>,
    Extension(current_user): Extension<UserID>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, Error>,
    WithRejection(Json(form), _): WithRejection<Json<EditUserForm>, Error>,
) -> Result<Json<UserJson>, Error> {
    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let user = get_user_by_id(UserID::new(user_id), &transaction)?;
    user.authorize(current_user, &transaction, "You can't edit other users!")?;

    let user = update_user(user, form, state.password_cost, &transaction)?;
    let json = user.to_json(&state.base_url, &transaction)?;

    transaction.commit()?;

    Ok(Json(json))
}

/// Apply the changes in `form` to `user` and save the result.
///
/// A new password is hashed with bcrypt `cost`.
///
/// # Errors
///
/// Returns an [Error::Validation] if a changed field is invalid, or one of the
/// duplicate errors if the new username or email is taken.
pub fn update_user(
    user: User,
    form: EditUserForm,
    cost: u32,
    connection: &Connection,
) -> Result<User, Error> {
    let username = match form.username {
        Some(username) => validate_text("username", &username)?,
        None => user.username,
    };
    let email = match form.email {
        Some(email) => validate_email(&email)?,
        None => user.email,
    };
    let password_hash = match form.password {
        Some(password) => PasswordHash::new(ValidatedPassword::new(&password)?, cost)?,
        None => user.password_hash,
    };
    let first_name = match form.first_name {
        Some(first_name) => validate_optional_text("first_name", Some(&first_name))?,
        None => user.first_name,
    };
    let last_name = match form.last_name {
        Some(last_name) => validate_optional_text("last_name", Some(&last_name))?,
        None => user.last_name,
    };

    let user = User {
        username,
        email,
        password_hash,
        confirmed: form.confirmed.unwrap_or(user.confirmed),
        first_name,
        last_name,
        ..user
    };

    connection.execute(
        "UPDATE user
        SET \
            username = ?1, \
            email = ?2, \
            password = ?3, \
            confirmed = ?4, \
            first_name = ?5, \
            last_name = ?6 \
        WHERE id = ?7;",
        params![
            user.username,
            user.email,
            user.password_hash.as_ref(),
            user.confirmed,
            user.first_name,
            user.last_name,
            user.id.as_i64(),
        ],
    )?;

    Ok(user)
}
