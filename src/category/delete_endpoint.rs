//! Defines the endpoint for deleting a category.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use crate::{
    Error,
    app_state::ResourceState,
    category::{delete_category, get_category_by_id},
    database_id::CategoryId,
    ownership::Owned,
    user::UserID,
};

/// A route handler for deleting a category and its transactions, only the
/// wallet owner may do this.
pub async fn delete_category_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Path(category_id), _): WithRejection<Path<CategoryId>, Error>,
) -> Result<Json<Value>, Error> {
    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let category = get_category_by_id(category_id, &transaction)?;
    category.authorize(
        user_id,
        &transaction,
        "You can't delete a category in a wallet you don't own!",
    )?;

    delete_category(category.id, &transaction)?;

    transaction.commit()?;
    tracing::info!("user {user_id} deleted category {category_id}");

    Ok(Json(json!({ "message": "Category deleted.", "code": 200 })))
}
