//! Defines the endpoint for recording a new transaction.

use axum::{Extension, Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    app_state::ResourceState,
    category::get_category_by_id,
    database_id::CategoryId,
    ownership::Owned,
    transaction::{Transaction, TransactionJson, create_transaction},
    user::UserID,
    validation::{validate_decimal, validate_optional_text},
};

/// The request body for recording a transaction.
///
/// The maker is always the user making the request.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub category_id: CategoryId,
}

/// A route handler for recording a transaction, responds with 201 Created.
///
/// The caller must own the wallet that the category belongs to.
pub async fn create_transaction_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Json(form), _): WithRejection<Json<TransactionForm>, Error>,
) -> Result<(StatusCode, Json<TransactionJson>), Error> {
    let amount = validate_decimal("amount", form.amount)?;
    let description = validate_description(&form.description)?;

    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let category = get_category_by_id(form.category_id, &transaction)?;
    category.authorize(
        user_id,
        &transaction,
        "You can't record a transaction in a wallet you don't own!",
    )?;

    let created = create_transaction(
        Transaction::build(category.id, user_id)
            .amount(amount)
            .description(&description),
        &transaction,
    )?;

    transaction.commit()?;
    tracing::info!("user {user_id} recorded transaction {}", created.id);

    Ok((StatusCode::CREATED, Json(created.to_json(&state.base_url))))
}

/// Trim `description` and check its length, an empty description is allowed.
pub(super) fn validate_description(description: &str) -> Result<String, Error> {
    validate_optional_text("description", Some(description))
        .map(Option::unwrap_or_default)
}
