//! Defines the endpoint for creating a parent category.

use axum::{Extension, Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    app_state::ResourceState,
    database_id::WalletId,
    ownership::Owned,
    parent_category::{NewParentCategory, ParentCategoryJson, create_parent_category},
    user::UserID,
    validation::{validate_decimal, validate_text},
    wallet::get_wallet_by_id,
};

/// The request body for creating a parent category.
#[derive(Debug, Clone, Deserialize)]
pub struct ParentCategoryForm {
    pub title: String,
    #[serde(default)]
    pub budget: Decimal,
    #[serde(default)]
    pub is_income: bool,
    /// The wallet to add the parent category to.
    pub wallet_id: WalletId,
}

/// A route handler for creating a parent category, responds with 201 Created.
///
/// The caller must own the wallet.
pub async fn create_parent_category_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Json(form), _): WithRejection<Json<ParentCategoryForm>, Error>,
) -> Result<(StatusCode, Json<ParentCategoryJson>), Error> {
    let title = validate_text("title", &form.title)?;
    let budget = validate_decimal("budget", form.budget)?;

    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let wallet = get_wallet_by_id(form.wallet_id, &transaction)?;
    wallet.authorize(
        user_id,
        &transaction,
        "You can't add a parent category to a wallet you don't own!",
    )?;

    let parent_category = create_parent_category(
        NewParentCategory {
            title,
            budget,
            is_income: form.is_income,
            wallet_id: wallet.id,
        },
        &transaction,
    )?;
    let json = parent_category.to_json(&state.base_url, &transaction)?;

    transaction.commit()?;
    tracing::info!(
        "user {user_id} created parent category {} in wallet {}",
        parent_category.id,
        wallet.id
    );

    Ok((StatusCode::CREATED, Json(json)))
}

#[cfg(test)]
mod tests {
    use axum::{Extension, Json, extract::State, http::StatusCode};
    use axum_extra::extract::WithRejection;
    use rust_decimal::Decimal;

    use crate::{
        Error,
        test_utils::{must_create_resource_state, must_create_test_user, must_create_wallet},
    };

    use super::{ParentCategoryForm, create_parent_category_endpoint};

    fn form(wallet_id: i64) -> ParentCategoryForm {
        ParentCategoryForm {
            title: "Bills".to_owned(),
            budget: Decimal::new(500, 0),
            is_income: false,
            wallet_id,
        }
    }

    #[tokio::test]
    async fn owner_can_create_parent_category() {
        let state = must_create_resource_state();
        let (alice, wallet) = {
            let connection = state.db_connection.lock().unwrap();
            let alice = must_create_test_user("alice", &connection);
            let wallet = must_create_wallet(alice.id, &connection);
            (alice, wallet)
        };

        let (status, Json(json)) = create_parent_category_endpoint(
            State(state),
            Extension(alice.id),
            WithRejection(Json(form(wallet.id)), Default::default()),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json.title, "Bills");
        assert_eq!(json.budget, Decimal::new(500, 0));
        assert!(json.wallet.ends_with(&format!("/api/v1.0/wallets/{}", wallet.id)));
    }

    #[tokio::test]
    async fn other_user_is_forbidden() {
        let state = must_create_resource_state();
        let (bob, wallet) = {
            let connection = state.db_connection.lock().unwrap();
            let alice = must_create_test_user("alice", &connection);
            let bob = must_create_test_user("bob", &connection);
            (bob, must_create_wallet(alice.id, &connection))
        };

        let result = create_parent_category_endpoint(
            State(state.clone()),
            Extension(bob.id),
            WithRejection(Json(form(wallet.id)), Default::default()),
        )
        .await;

        assert!(matches!(result, Err(Error::Forbidden(_))));
        let connection = state.db_connection.lock().unwrap();
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM parent_category", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn missing_wallet_is_not_found() {
        let state = must_create_resource_state();
        let alice = must_create_test_user("alice", &state.db_connection.lock().unwrap());

        let result = create_parent_category_endpoint(
            State(state),
            Extension(alice.id),
            WithRejection(Json(form(42)), Default::default()),
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
