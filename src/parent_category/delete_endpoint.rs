//! Defines the endpoint for deleting a parent category.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use crate::{
    Error,
    app_state::ResourceState,
    database_id::ParentCategoryId,
    ownership::Owned,
    parent_category::{delete_parent_category, get_parent_category_by_id},
    user::UserID,
};

/// A route handler for deleting a parent category and its categories, only the
/// wallet owner may do this.
pub async fn delete_parent_category_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Path(parent_category_id), _): WithRejection<Path<ParentCategoryId>, Error>,
) -> Result<Json<Value>, Error> {
    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let parent_category = get_parent_category_by_id(parent_category_id, &transaction)?;
    parent_category.authorize(
        user_id,
        &transaction,
        "You can't delete a parent category in a wallet you don't own!",
    )?;

    delete_parent_category(parent_category.id, &transaction)?;

    transaction.commit()?;
    tracing::info!("user {user_id} deleted parent category {parent_category_id}");

    Ok(Json(
        json!({ "message": "Parent category deleted.", "code": 200 }),
    ))
}
