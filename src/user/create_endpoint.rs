//! Defines the endpoint for creating a new user.

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    Error, PasswordHash, ValidatedPassword,
    app_state::ResourceState,
    user::{NewUser, User, UserJson, create_user},
    validation::{validate_email, validate_optional_text, validate_text},
};

/// The request body for creating a user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserForm {
    /// The name the user logs in with.
    pub username: String,
    /// The user's email address.
    pub email: String,
    /// The plain text password, hashed before it is stored.
    pub password: String,
    /// Whether the user has confirmed their email address.
    #[serde(default)]
    pub confirmed: bool,
    /// The user's first name.
    pub first_name: Option<String>,
    /// The user's last name.
    pub last_name: Option<String>,
}

impl UserForm {
    /// Validate the fields and hash the password with bcrypt `cost`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if a field is blank or malformed, or
    /// [Error::HashingError] if the password could not be hashed.
    pub fn into_new_user(self, cost: u32) -> Result<NewUser, Error> {
        let username = validate_text("username", &self.username)?;
        let email = validate_email(&self.email)?;
        let password = ValidatedPassword::new(&self.password)?;

        Ok(NewUser {
            username,
            email,
            password_hash: PasswordHash::new(password, cost)?,
            confirmed: self.confirmed,
            first_name: validate_optional_text("first_name", self.first_name.as_deref())?,
            last_name: validate_optional_text("last_name", self.last_name.as_deref())?,
        })
    }
}

/// A route handler for creating a new user, responds with the user and 201 Created.
pub async fn create_user_endpoint(
    State(state): State<ResourceState>,
    WithRejection(Json(form), _): WithRejection<Json<UserForm>, Error>,
) -> Result<(StatusCode, Json<UserJson>), Error> {
    let new_user = form.into_new_user(state.password_cost)?;

    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let user: User = create_user(new_user, &transaction)?;
    let json = user.to_json(&state.base_url, &transaction)?;

    transaction.commit()?;
    tracing::info!("created user {}", user.id);

    Ok((StatusCode::CREATED, Json(json)))
}

#[cfg(test)]
mod tests {
    use axum::{Json, extract::State, http::StatusCode};
    use axum_extra::extract::WithRejection;

    use crate::{
        Error,
        test_utils::{TEST_BASE_URL, must_create_resource_state},
        user::get_user_by_id,
    };

    use super::{UserForm, create_user_endpoint};

    fn form() -> UserForm {
        UserForm {
            username: "test_user2".to_owned(),
            email: "user2@example.com".to_owned(),
            password: "password2".to_owned(),
            confirmed: true,
            first_name: Some("test_first_name".to_owned()),
            last_name: Some("test_last_name".to_owned()),
        }
    }

    #[tokio::test]
    async fn can_create_user() {
        let state = must_create_resource_state();

        let (status, Json(json)) =
            create_user_endpoint(State(state.clone()), WithRejection(Json(form()), Default::default()))
                .await
                .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json.username, "test_user2");
        assert_eq!(json.email, "user2@example.com");
        assert!(json.confirmed);
        assert_eq!(json.first_name.as_deref(), Some("test_first_name"));
        assert_eq!(
            json.url,
            format!("{TEST_BASE_URL}/api/v1.0/users/{}", json.id)
        );
        assert!(json.wallets.is_empty());

        let connection = state.db_connection.lock().unwrap();
        let user = get_user_by_id(json.id, &connection).unwrap();
        assert!(user.password_hash.verify("password2").unwrap());
    }

    #[tokio::test]
    async fn blank_username_is_rejected() {
        let state = must_create_resource_state();
        let form = UserForm {
            username: " ".to_owned(),
            ..form()
        };

        let result =
            create_user_endpoint(State(state), WithRejection(Json(form), Default::default())).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let state = must_create_resource_state();
        let form = UserForm {
            email: "not an email".to_owned(),
            ..form()
        };

        let result =
            create_user_endpoint(State(state), WithRejection(Json(form), Default::default())).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let state = must_create_resource_state();
        let _ = create_user_endpoint(
            State(state.clone()),
            WithRejection(Json(form()), Default::default()),
        )
        .await
        .unwrap();
        let form = UserForm {
            email: "other@example.com".to_owned(),
            ..form()
        };

        let result =
            create_user_endpoint(State(state), WithRejection(Json(form), Default::default())).await;

        assert!(matches!(result, Err(Error::DuplicateUsername)));
    }
}
