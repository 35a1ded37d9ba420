//! Defines the endpoint for creating a category.

use axum::{Extension, Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    app_state::ResourceState,
    category::{CategoryJson, NewCategory, create_category},
    database_id::ParentCategoryId,
    ownership::Owned,
    parent_category::get_parent_category_by_id,
    user::UserID,
    validation::{validate_decimal, validate_text},
};

/// The request body for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryForm {
    pub title: String,
    #[serde(default)]
    pub budget: Decimal,
    #[serde(default)]
    pub has_bills: bool,
    pub parent_category_id: ParentCategoryId,
}

/// A route handler for creating a category, responds with 201 Created.
///
/// The caller must own the wallet that the parent category belongs to.
pub async fn create_category_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Json(form), _): WithRejection<Json<CategoryForm>, Error>,
) -> Result<(StatusCode, Json<CategoryJson>), Error> {
    let title = validate_text("title", &form.title)?;
    let budget = validate_decimal("budget", form.budget)?;

    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let parent_category = get_parent_category_by_id(form.parent_category_id, &transaction)?;
    parent_category.authorize(
        user_id,
        &transaction,
        "You can't add a category to a wallet you don't own!",
    )?;

    let category = create_category(
        NewCategory {
            title,
            budget,
            has_bills: form.has_bills,
            parent_category_id: parent_category.id,
        },
        &transaction,
    )?;
    let json = category.to_json(&state.base_url, &transaction)?;

    transaction.commit()?;
    tracing::info!("user {user_id} created category {}", category.id);

    Ok((StatusCode::CREATED, Json(json)))
}
