//! Defines the endpoint for updating a transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    app_state::ResourceState,
    category::get_category_by_id,
    database_id::{CategoryId, TransactionId},
    ownership::Owned,
    transaction::{
        TransactionJson, create_endpoint::validate_description, get_transaction_by_id,
        update_transaction,
    },
    user::UserID,
    validation::validate_optional_decimal,
};

/// The fields of a transaction that may be changed. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditTransactionForm {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    /// Moves the transaction to another category.
    pub category_id: Option<CategoryId>,
}

/// A route handler for updating a transaction, only its maker may do this.
pub async fn edit_transaction_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Path(transaction_id), _): WithRejection<Path<TransactionId>, Error>,
    WithRejection(Json(form), _): WithRejection<Json<EditTransactionForm>, Error>,
) -> Result<Json<TransactionJson>, Error> {
    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let mut record = get_transaction_by_id(transaction_id, &transaction)?;
    record.authorize(
        user_id,
        &transaction,
        "You can't edit a transaction you didn't make!",
    )?;

    match form.category_id {
        Some(category_id) if category_id != record.category_id => {
            get_category_by_id(category_id, &transaction)?.authorize(
                user_id,
                &transaction,
                "You can't move a transaction to a wallet you don't own!",
            )?;
            record.category_id = category_id;
        }
        _ => {}
    }

    if let Some(amount) = validate_optional_decimal("amount", form.amount)? {
        record.amount = amount;
    }

    if let Some(description) = form.description {
        record.description = validate_description(&description)?;
    }

    update_transaction(&record, &transaction)?;

    transaction.commit()?;

    Ok(Json(record.to_json(&state.base_url)))
}
